//! Configuration data models
//!
//! This module defines all configuration structures used by the executor
//! and the command-line front end.

pub mod credentials;
pub mod endpoint;
pub mod executor;
pub mod logging;
pub mod purge;

// Re-export all configuration types
pub use credentials::*;
pub use endpoint::*;
pub use executor::*;
pub use logging::*;
pub use purge::*;

/// Default maximum number of requests in flight per wave
pub fn default_max_concurrent() -> usize {
    100
}

/// Default backoff window after a rate-limited wave, in seconds
pub fn default_backoff_secs() -> u64 {
    10
}

/// Default deletion endpoint
pub fn default_endpoint_url() -> String {
    "https://twitter.com/i/api/1.1/statuses/destroy.json".to_string()
}

/// Default name of the cookie carrying the anti-forgery value
pub fn default_csrf_cookie() -> String {
    "ct0".to_string()
}

/// Default name of the header the anti-forgery value is mirrored into
pub fn default_csrf_header() -> String {
    "x-csrf-token".to_string()
}

pub fn default_user_agent() -> String {
    format!("tweet-purge/{}", env!("CARGO_PKG_VERSION"))
}

pub fn default_log_level() -> String {
    "info".to_string()
}
