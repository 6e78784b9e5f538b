//! Configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use reqwest::header::HeaderName;
use tracing::debug;
use url::Url;

/// Check that a URL parses and uses http or https
fn validate_http_url(url_str: &str, context: &str) -> Result<(), String> {
    let url = Url::parse(url_str)
        .map_err(|e| format!("{} has invalid URL format: {}", context, e))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "{} must use http:// or https:// scheme, got: {}",
                context, scheme
            ));
        }
    }

    if url.host_str().is_none() {
        return Err(format!("{} URL must have a valid host", context));
    }

    Ok(())
}

impl Validate for PurgeConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating purge configuration");

        self.executor.validate()?;
        self.endpoint.validate()?;
        self.credentials.validate()?;
        self.logging.validate()?;

        debug!("Purge configuration validation completed");
        Ok(())
    }
}

impl Validate for ExecutorConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_concurrent == 0 {
            return Err("max_concurrent must be at least 1".to_string());
        }
        if self.backoff_secs == 0 {
            return Err("backoff_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Validate for EndpointConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url(&self.url, "Endpoint")?;

        if self.csrf_cookie.trim().is_empty() {
            return Err("csrf_cookie cannot be empty".to_string());
        }
        if self.csrf_cookie.contains(['=', ';']) {
            return Err(format!(
                "csrf_cookie '{}' is not a valid cookie name",
                self.csrf_cookie
            ));
        }

        HeaderName::from_bytes(self.csrf_header.as_bytes())
            .map_err(|e| format!("csrf_header '{}' is invalid: {}", self.csrf_header, e))?;

        if self.request_timeout_secs == Some(0) {
            return Err("request_timeout_secs must be greater than 0 when set".to_string());
        }

        Ok(())
    }
}

impl Validate for CredentialsConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(token) = &self.token {
            if token.trim().is_empty() {
                return Err("token cannot be empty when set".to_string());
            }
        }
        if let Some(script_url) = &self.script_url {
            validate_http_url(script_url, "Script")?;
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map_err(|e| format!("Invalid log level '{}': {}", self.level, e))?;
        Ok(())
    }
}
