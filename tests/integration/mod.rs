//! Integration tests for tweet-purge
//!
//! These tests drive the public API against a mock deletion endpoint.

pub mod config_tests;
pub mod purge_tests;
