//! Credential configuration

use serde::{Deserialize, Serialize};

/// Sources for the bearer token and the site cookies
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CredentialsConfig {
    /// Bearer token used as-is
    #[serde(default)]
    pub token: Option<String>,
    /// Script to scrape the bearer token from when no token is given
    #[serde(default)]
    pub script_url: Option<String>,
    /// Raw cookie header, e.g. `ct0=abc; auth_token=def`
    #[serde(default)]
    pub cookies: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("script_url", &self.script_url)
            .field("cookies", &self.cookies.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CredentialsConfig {
    /// Merge credential configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.script_url.is_some() {
            self.script_url = other.script_url;
        }
        if other.cookies.is_some() {
            self.cookies = other.cookies;
        }
        self
    }
}
