//! Scheduler data types

use super::execution::ExecutionSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Terminal classification of one id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// 2xx
    Success,
    /// 4xx other than 429
    ClientError,
    /// 5xx
    ServerError,
    /// Any other status code
    Unexpected,
    /// No response was received
    NetworkError,
}

impl Outcome {
    /// Classify a non-429 status code
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => Self::Success,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Unexpected,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Status code that means "rate limited, retry later"
pub const RATE_LIMITED: u16 = 429;

/// One terminal result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: String,
    pub outcome: Outcome,
    /// Raw status code, absent for network errors
    pub status: Option<u16>,
    pub recorded_at: DateTime<Utc>,
}

impl ResultRecord {
    pub fn from_status(id: impl Into<String>, status: u16) -> Self {
        Self {
            id: id.into(),
            outcome: Outcome::from_status(status),
            status: Some(status),
            recorded_at: Utc::now(),
        }
    }

    pub fn network_error(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            outcome: Outcome::NetworkError,
            status: None,
            recorded_at: Utc::now(),
        }
    }
}

/// Cumulative results keyed by id
pub type ResultsMap = HashMap<String, ResultRecord>;

/// Scheduler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerState {
    Idle,
    Running,
    BackingOff,
    Done,
    Aborted,
}

impl SchedulerState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }
}

impl std::fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::BackingOff => "backing_off",
            Self::Done => "done",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Events emitted while an execution runs
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionEvent {
    StateChanged(SchedulerState),
    /// Full status text for the display surface
    Status(String),
    /// Set sizes, emitted alongside every status text
    Progress(ExecutionSnapshot),
    /// Final signal, always the last event of a dispatched execution
    Finished(SchedulerState),
}

/// Summary of a finished execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub execution_id: Uuid,
    pub state: SchedulerState,
    /// Number of distinct ids submitted
    pub total: usize,
    pub results: Vec<ResultRecord>,
    /// Ids without a terminal result (only non-empty when aborted)
    pub unresolved: Vec<String>,
    pub waves: usize,
    pub backoff_cycles: usize,
}

impl ExecutionReport {
    pub fn count(&self, outcome: Outcome) -> usize {
        self.results.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn succeeded(&self) -> usize {
        self.count(Outcome::Success)
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    pub fn result_for(&self, id: &str) -> Option<&ResultRecord> {
        self.results.iter().find(|r| r.id == id)
    }
}
