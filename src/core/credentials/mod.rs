//! Bearer credential resolution
//!
//! The scheduler resolves the credential exactly once per execution through
//! a [`CredentialResolver`]. Any failure is reported as
//! [`PurgeError::CredentialNotFound`] and stops the execution before a
//! single request is sent.

mod script;

pub use script::{ScriptCredentialResolver, longest_quoted_literal};

use crate::config::CredentialsConfig;
use crate::utils::error::{PurgeError, Result};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait CredentialResolver: Send + Sync {
    /// Produce the opaque bearer token
    async fn resolve(&self) -> Result<String>;
}

/// A token supplied up front
#[derive(Clone)]
pub struct StaticCredential {
    token: String,
}

impl StaticCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialResolver for StaticCredential {
    async fn resolve(&self) -> Result<String> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(PurgeError::credential_not_found("configured token is empty"));
        }
        Ok(token.to_string())
    }
}

/// Resolver used when no credential source is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredential;

#[async_trait]
impl CredentialResolver for NoCredential {
    async fn resolve(&self) -> Result<String> {
        Err(PurgeError::credential_not_found(
            "no token or script_url configured",
        ))
    }
}

/// Pick the resolver for a configuration: an explicit token wins over scraping
pub fn resolver_from_config(config: &CredentialsConfig) -> Result<Arc<dyn CredentialResolver>> {
    if let Some(token) = &config.token {
        return Ok(Arc::new(StaticCredential::new(token.clone())));
    }
    if let Some(script_url) = &config.script_url {
        return Ok(Arc::new(ScriptCredentialResolver::new(script_url)?));
    }
    Ok(Arc::new(NoCredential))
}
