//! Top-level purge configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Complete configuration as it appears in the YAML file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PurgeConfig {
    #[serde(default)]
    pub executor: ExecutorConfig,
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PurgeConfig {
    /// Merge purge configurations (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.executor = self.executor.merge(other.executor);
        self.endpoint = self.endpoint.merge(other.endpoint);
        self.credentials = self.credentials.merge(other.credentials);
        self.logging = self.logging.merge(other.logging);
        self
    }
}
