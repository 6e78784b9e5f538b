//! Error handling for the purge executor
//!
//! Only failures that stop a whole execution are errors. Per-request
//! failures are classified as outcomes by the scheduler and never surface
//! here.

mod helpers;
mod types;

pub use types::{PurgeError, Result};
