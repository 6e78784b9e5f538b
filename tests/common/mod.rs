//! Common test utilities for tweet-purge
//!
//! # Usage
//!
//! ```rust
//! use crate::common::{fixtures, server};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let endpoint = server::MockEndpoint::start().await;
//!     let config = fixtures::ConfigFactory::for_endpoint(&endpoint);
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod server;

// Re-export commonly used items
pub use fixtures::{ConfigFactory, IdFactory};
pub use server::MockEndpoint;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
