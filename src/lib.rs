//! # tweet-purge
//!
//! Rate-limited, concurrency-capped batch deletion of tweets.
//!
//! ## Features
//!
//! - **Wave scheduling**: At most `max_concurrent` requests in flight, each wave fully settled before the next
//! - **Rate limit recovery**: A single 429 interrupts its wave, requeues it and backs off
//! - **Cancellation**: Stop at any time; unresolved ids are reported, never silently dropped
//! - **Status reporting**: Human-readable progress text after every settlement
//! - **Pluggable seams**: Transport, credential resolution and cookie storage are traits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tweet_purge::{Config, scheduler_from_config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/tweet-purge.yaml").await?;
//!     let scheduler = scheduler_from_config(&config)?;
//!
//!     let report = scheduler
//!         .submit(vec!["1234567890".to_string(), "1234567891".to_string()])
//!         .await?;
//!
//!     println!("{} deleted, {} failed", report.succeeded(), report.failed());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{PurgeError, Result};

pub use crate::core::cancellation::{CancelCause, CancelHandle, CancellationController};
pub use crate::core::credentials::{
    CredentialResolver, NoCredential, ScriptCredentialResolver, StaticCredential,
};
pub use crate::core::request::{CookieJar, CookieStore, RequestBuilder, RequestDraft, parse_id_list};
pub use crate::core::scheduler::{
    ConcurrencyScheduler, ExecutionEvent, ExecutionReport, ExecutionSnapshot, Outcome,
    ResultRecord, SchedulerState,
};
pub use crate::core::scheduler_from_config;
pub use crate::core::status::StatusReporter;
pub use crate::core::transport::{HttpTransport, Transport};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
/// Version line with commit, build time and compiler, as printed by `--version`
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("GIT_HASH"),
    "\nbuilt: ",
    env!("BUILD_TIME"),
    "\nrustc: ",
    env!("RUST_VERSION"),
);

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
