//! Error handling utilities
//!
//! This module defines the fatal error type shared by the executor, the
//! configuration layer and the command-line front end.

pub mod error;

pub use error::*;
