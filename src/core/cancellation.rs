//! Cancellation scopes
//!
//! An execution owns one global scope, set by the user and never reset, and
//! creates a fresh wave scope for every wave. A wave scope is tripped by the
//! aggregator when a wave member is rate limited. The scopes are observed
//! independently; in-flight requests stop waiting when either one fires, and
//! the cause is always attributed to the global scope first.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Which scope interrupted a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelCause {
    /// The user cancelled the whole execution
    Global,
    /// A sibling in the same wave hit the rate limit
    Wave,
}

/// Owner of the global scope and factory for wave scopes
#[derive(Debug, Clone, Default)]
pub struct CancellationController {
    global: CancellationToken,
    announced: Arc<AtomicBool>,
}

impl CancellationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the global scope
    ///
    /// Returns `true` for the call that actually set it; later calls are no-ops.
    pub fn cancel(&self) -> bool {
        let first = !self.announced.swap(true, Ordering::AcqRel);
        if first {
            warn!("cancellation requested, no further waves will be scheduled");
        }
        self.global.cancel();
        first
    }

    pub fn is_cancelled(&self) -> bool {
        self.global.is_cancelled()
    }

    /// Resolves once the global scope is set
    pub async fn cancelled(&self) {
        self.global.cancelled().await
    }

    /// Create a fresh scope for the next wave
    pub fn wave_scope(&self) -> WaveScope {
        WaveScope {
            wave: CancellationToken::new(),
            global: self.global.clone(),
        }
    }

    /// A cloneable handle callers can use to cancel from elsewhere
    pub fn handle(&self) -> CancelHandle {
        CancelHandle {
            controller: self.clone(),
        }
    }
}

/// Cloneable handle that sets the global scope
#[derive(Debug, Clone)]
pub struct CancelHandle {
    controller: CancellationController,
}

impl CancelHandle {
    pub fn cancel(&self) -> bool {
        self.controller.cancel()
    }

    pub fn is_cancelled(&self) -> bool {
        self.controller.is_cancelled()
    }
}

/// Cancellation scope of a single wave
#[derive(Debug, Clone)]
pub struct WaveScope {
    wave: CancellationToken,
    global: CancellationToken,
}

impl WaveScope {
    /// Trip this wave's scope; the global scope is untouched
    pub fn cancel(&self) {
        self.wave.cancel();
    }

    /// Whether this wave's own scope has been tripped
    pub fn is_cancelled(&self) -> bool {
        self.wave.is_cancelled()
    }

    /// Whether the global scope has been set
    pub fn is_globally_cancelled(&self) -> bool {
        self.global.is_cancelled()
    }

    /// Which scope, if any, stopped this wave; global wins
    pub fn cause(&self) -> Option<CancelCause> {
        if self.global.is_cancelled() {
            Some(CancelCause::Global)
        } else if self.wave.is_cancelled() {
            Some(CancelCause::Wave)
        } else {
            None
        }
    }

    /// Resolves as soon as either scope fires
    pub async fn interrupted(&self) {
        tokio::select! {
            _ = self.wave.cancelled() => {}
            _ = self.global.cancelled() => {}
        }
    }
}
