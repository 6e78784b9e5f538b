//! Configuration loading utilities
//!
//! Environment overrides use the `TWEET_PURGE_` prefix.

use super::models::*;
use crate::utils::error::{PurgeError, Result};
use std::env;
use tracing::debug;

pub const ENV_PREFIX: &str = "TWEET_PURGE_";

impl PurgeConfig {
    /// Apply overrides from the process environment
    pub fn apply_env(self) -> Result<Self> {
        self.apply_lookup(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_lookup<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        // Executor configuration
        if let Some(max) = var("MAX_CONCURRENT") {
            self.executor.max_concurrent = max
                .parse()
                .map_err(|e| PurgeError::Config(format!("Invalid max concurrent: {}", e)))?;
        }
        if let Some(backoff) = var("BACKOFF_SECS") {
            self.executor.backoff_secs = backoff
                .parse()
                .map_err(|e| PurgeError::Config(format!("Invalid backoff seconds: {}", e)))?;
        }

        // Endpoint configuration
        if let Some(url) = var("ENDPOINT") {
            self.endpoint.url = url;
        }
        if let Some(cookie) = var("CSRF_COOKIE") {
            self.endpoint.csrf_cookie = cookie;
        }
        if let Some(header) = var("CSRF_HEADER") {
            self.endpoint.csrf_header = header;
        }
        if let Some(timeout) = var("REQUEST_TIMEOUT_SECS") {
            self.endpoint.request_timeout_secs = Some(
                timeout
                    .parse()
                    .map_err(|e| PurgeError::Config(format!("Invalid request timeout: {}", e)))?,
            );
        }

        // Credentials
        if let Some(token) = var("TOKEN") {
            self.credentials.token = Some(token);
        }
        if let Some(script_url) = var("SCRIPT_URL") {
            self.credentials.script_url = Some(script_url);
        }
        if let Some(cookies) = var("COOKIES") {
            self.credentials.cookies = Some(cookies);
        }

        // Logging
        if let Some(level) = var("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("LOG_FORMAT") {
            self.logging.format = format.parse().map_err(PurgeError::Config)?;
        }

        debug!("Configuration overrides applied from environment");
        Ok(self)
    }
}
