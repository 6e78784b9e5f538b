//! Configuration management for the purge executor
//!
//! This module handles loading, validation, and merging of the executor,
//! endpoint, credential and logging configuration.

pub mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{PurgeError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub purge: PurgeConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PurgeError::Config(format!("Failed to read config file: {}", e)))?;

        let purge: PurgeConfig = serde_yaml::from_str(&content)
            .map_err(|e| PurgeError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { purge };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let purge = PurgeConfig::default().apply_env()?;
        let config = Self { purge };

        config.validate()?;
        Ok(config)
    }

    /// Load the optional file, then layer the environment on top
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };

        let config = Self {
            purge: base.purge.apply_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn executor(&self) -> &ExecutorConfig {
        &self.purge.executor
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        &self.purge.endpoint
    }

    pub fn credentials(&self) -> &CredentialsConfig {
        &self.purge.credentials
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.purge.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        Validate::validate(&self.purge).map_err(PurgeError::Config)?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.purge = self.purge.merge(other.purge);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.purge)
            .map_err(|e| PurgeError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
