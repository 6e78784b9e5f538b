//! Remote endpoint configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where deletion requests go and how they are authenticated against forgery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointConfig {
    /// Deletion endpoint
    #[serde(default = "default_endpoint_url")]
    pub url: String,
    /// Cookie holding the anti-forgery value
    #[serde(default = "default_csrf_cookie")]
    pub csrf_cookie: String,
    /// Header the anti-forgery value is sent in
    #[serde(default = "default_csrf_header")]
    pub csrf_header: String,
    /// Transport timeout per request, unset means no timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_endpoint_url(),
            csrf_cookie: default_csrf_cookie(),
            csrf_header: default_csrf_header(),
            request_timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl EndpointConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Merge endpoint configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.url != default_endpoint_url() {
            self.url = other.url;
        }
        if other.csrf_cookie != default_csrf_cookie() {
            self.csrf_cookie = other.csrf_cookie;
        }
        if other.csrf_header != default_csrf_header() {
            self.csrf_header = other.csrf_header;
        }
        if other.request_timeout_secs.is_some() {
            self.request_timeout_secs = other.request_timeout_secs;
        }
        if other.user_agent != default_user_agent() {
            self.user_agent = other.user_agent;
        }
        self
    }
}
