//! Bearer token scraped from the site's main script
//!
//! The web client embeds its public bearer token as a string literal in its
//! main bundle. The longest quoted run of `[A-Za-z0-9%]` in that script is
//! taken as the token.

use super::CredentialResolver;
use crate::utils::error::{PurgeError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

static QUOTED_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([A-Za-z0-9%]+)""#).expect("literal pattern is valid"));

/// Longest double-quoted `[A-Za-z0-9%]+` literal in the text, first one wins ties
pub fn longest_quoted_literal(text: &str) -> Option<&str> {
    QUOTED_LITERAL
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .fold(None, |longest: Option<&str>, candidate| match longest {
            Some(current) if current.len() >= candidate.len() => Some(current),
            _ => Some(candidate),
        })
}

#[derive(Debug, Clone)]
pub struct ScriptCredentialResolver {
    script_url: Url,
    client: Client,
}

impl ScriptCredentialResolver {
    pub fn new(script_url: &str) -> Result<Self> {
        let script_url = Url::parse(script_url)
            .map_err(|e| PurgeError::Config(format!("Invalid script URL: {}", e)))?;
        Ok(Self {
            script_url,
            client: Client::new(),
        })
    }
}

#[async_trait]
impl CredentialResolver for ScriptCredentialResolver {
    async fn resolve(&self) -> Result<String> {
        info!("Fetching bearer token from {}", self.script_url);

        let response = self
            .client
            .get(self.script_url.clone())
            .send()
            .await
            .map_err(|e| PurgeError::credential_not_found(format!("script fetch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(PurgeError::credential_not_found(format!(
                "script fetch returned {}",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| PurgeError::credential_not_found(format!("script body unreadable: {}", e)))?;

        let token = longest_quoted_literal(&text).ok_or_else(|| {
            PurgeError::credential_not_found("no string literal found in main script")
        })?;

        debug!(length = token.len(), "bearer token extracted");
        Ok(token.to_string())
    }
}
