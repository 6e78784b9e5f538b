//! Wave scheduling of request drafts
//!
//! The [`ConcurrencyScheduler`] takes a list of ids, turns each into a
//! request draft and dispatches them in waves. Results are classified into
//! [`Outcome`]s; a 429 anywhere in a wave interrupts its siblings and puts
//! the whole set back on the retry queue behind a backoff countdown.

mod execution;
mod executor;
mod types;

pub use execution::ExecutionSnapshot;
pub use executor::ConcurrencyScheduler;
pub use types::{
    ExecutionEvent, ExecutionReport, Outcome, RATE_LIMITED, ResultRecord, ResultsMap,
    SchedulerState,
};
