//! Utility modules for the purge executor
//!
//! ## Module Organization
//!
//! - **error**: Error types and constructors
//! - **logging**: Tracing subscriber setup

pub mod error; // Error handling
pub mod logging; // Logging
