//! Core functionality for the purge executor
//!
//! This module contains the request drafting, transport, credential
//! resolution, cancellation and wave scheduling components.

pub mod cancellation;
pub mod credentials;
pub mod request;
pub mod scheduler;
pub mod status;
pub mod transport;

use crate::config::Config;
use crate::utils::error::Result;
use request::{CookieJar, CookieStore, RequestBuilder};
use scheduler::ConcurrencyScheduler;
use std::sync::Arc;
use tracing::{debug, info};
use transport::HttpTransport;

/// Wire a scheduler from configuration
///
/// Builds the cookie store, the pooled HTTP transport and the credential
/// resolver described by `config`. Nothing is sent until
/// [`ConcurrencyScheduler::submit`] is called.
pub fn scheduler_from_config(config: &Config) -> Result<ConcurrencyScheduler> {
    info!("Initializing purge executor");

    let jar = config
        .credentials()
        .cookies
        .as_deref()
        .map(CookieJar::parse)
        .unwrap_or_default();
    debug!(cookies = jar.len(), "cookie store ready");
    let cookies: Arc<dyn CookieStore> = Arc::new(jar);

    let builder = RequestBuilder::new(config.endpoint(), cookies.clone());
    let transport = Arc::new(HttpTransport::new(config.endpoint(), cookies)?);
    let resolver = credentials::resolver_from_config(config.credentials())?;

    debug!(
        endpoint = builder.endpoint(),
        max_concurrent = config.executor().max_concurrent,
        backoff_secs = config.executor().backoff_secs,
        "purge executor initialized"
    );

    Ok(ConcurrencyScheduler::new(
        config.executor().clone(),
        builder,
        transport,
        resolver,
    ))
}
