//! Transport seam between the scheduler and the network
//!
//! A transport sends one draft and reports the HTTP status code, or a
//! network error when no response was received. Classification of the code
//! is left to the scheduler.

mod http;

pub use http::{HttpTransport, PoolConfig};

use super::request::RequestDraft;
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the draft and return the response status code
    async fn send(&self, draft: &RequestDraft) -> Result<u16>;
}
