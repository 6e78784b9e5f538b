//! Test fixtures and data factories

use super::server::MockEndpoint;
use tweet_purge::Config;

pub const TEST_TOKEN: &str = "AAAAAAAAAAAAAAAAAAAAAtesttoken%3D";
pub const TEST_CSRF: &str = "csrf-test-value";

/// Factory for id lists
pub struct IdFactory;

impl IdFactory {
    /// `count` distinct snowflake-looking ids
    pub fn sequential(count: usize) -> Vec<String> {
        (0..count)
            .map(|i| (1_700_000_000_000_000_000u64 + i as u64).to_string())
            .collect()
    }
}

/// Factory for configurations pointing at a mock endpoint
pub struct ConfigFactory;

impl ConfigFactory {
    /// Fast configuration: one second backoff, static token, csrf cookie set
    pub fn for_endpoint(endpoint: &MockEndpoint) -> Config {
        let mut config = Config::default();
        config.purge.endpoint.url = endpoint.destroy_url();
        config.purge.endpoint.request_timeout_secs = Some(5);
        config.purge.executor.backoff_secs = 1;
        config.purge.credentials.token = Some(TEST_TOKEN.to_string());
        config.purge.credentials.cookies = Some(format!("ct0={}; auth_token=session", TEST_CSRF));
        config
    }

    /// Same as [`ConfigFactory::for_endpoint`] with a custom wave size
    pub fn with_max_concurrent(endpoint: &MockEndpoint, max_concurrent: usize) -> Config {
        let mut config = Self::for_endpoint(endpoint);
        config.purge.executor.max_concurrent = max_concurrent;
        config
    }
}
