//! Executor configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wave sizing and backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutorConfig {
    /// Maximum number of requests dispatched together in one wave
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    /// Countdown observed after a wave that hit the rate limit
    #[serde(default = "default_backoff_secs")]
    pub backoff_secs: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            backoff_secs: default_backoff_secs(),
        }
    }
}

impl ExecutorConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wave size limit
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Set the backoff window
    pub fn with_backoff_secs(mut self, backoff_secs: u64) -> Self {
        self.backoff_secs = backoff_secs;
        self
    }

    /// Backoff window as a duration
    pub fn backoff(&self) -> Duration {
        Duration::from_secs(self.backoff_secs)
    }

    /// Merge executor configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.max_concurrent != default_max_concurrent() {
            self.max_concurrent = other.max_concurrent;
        }
        if other.backoff_secs != default_backoff_secs() {
            self.backoff_secs = other.backoff_secs;
        }
        self
    }
}
