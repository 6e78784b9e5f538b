//! Status reporting for external display surfaces

mod reporter;

pub use reporter::{StatusReporter, StatusSuffix, WaveHeader, status_name};
