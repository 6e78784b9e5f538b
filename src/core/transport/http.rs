use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::COOKIE;
use tracing::trace;

use super::Transport;
use crate::config::EndpointConfig;
use crate::core::request::{CookieStore, HttpMethod, RequestDraft};
use crate::utils::error::{PurgeError, Result};

/// Connection pool settings
pub struct PoolConfig;
impl PoolConfig {
    pub const POOL_SIZE: usize = 100;
    pub const KEEPALIVE_SECS: u64 = 90;
}

/// Pooled `reqwest` transport
///
/// Drafts flagged with `include_credentials` carry the cookie store's
/// `Cookie` header.
#[derive(Clone)]
pub struct HttpTransport {
    client: Arc<Client>,
    cookies: Arc<dyn CookieStore>,
}

impl HttpTransport {
    pub fn new(endpoint: &EndpointConfig, cookies: Arc<dyn CookieStore>) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&endpoint.user_agent)
            .pool_idle_timeout(Duration::from_secs(PoolConfig::KEEPALIVE_SECS))
            .pool_max_idle_per_host(PoolConfig::POOL_SIZE);

        if let Some(timeout) = endpoint.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| PurgeError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
            cookies,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, draft: &RequestDraft) -> Result<u16> {
        let mut request_builder = match draft.method() {
            HttpMethod::GET => self.client.get(draft.url()),
            HttpMethod::POST => self.client.post(draft.url()),
            HttpMethod::PUT => self.client.put(draft.url()),
            HttpMethod::DELETE => self.client.delete(draft.url()),
        };

        for (key, value) in draft.headers() {
            request_builder = request_builder.header(key.as_str(), value.as_str());
        }

        if draft.include_credentials() {
            if let Some(cookie_header) = self.cookies.header_value() {
                request_builder = request_builder.header(COOKIE, cookie_header);
            }
        }

        let response = request_builder
            .body(draft.body().to_string())
            .send()
            .await
            .map_err(|e| PurgeError::network(e.to_string()))?;

        let status = response.status().as_u16();
        trace!(id = draft.id(), status, "response received");
        Ok(status)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}
