//! Run state of one execution
//!
//! Every id lives in exactly one of: pending, in flight, retry, results.
//! All mutation goes through the methods below, which move ids between
//! those sets and never copy them.

use super::types::{ExecutionReport, ResultRecord, ResultsMap, SchedulerState};
use crate::core::request::{RequestBuilder, RequestDraft};
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use uuid::Uuid;

/// Sizes of the four id sets at one observation point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecutionSnapshot {
    pub total: usize,
    pub results: usize,
    pub pending: usize,
    pub retry: usize,
    pub in_flight: usize,
}

impl ExecutionSnapshot {
    /// Whether every submitted id is accounted for exactly once
    pub fn is_consistent(&self) -> bool {
        self.results + self.pending + self.retry + self.in_flight == self.total
    }
}

#[derive(Debug)]
pub(crate) struct Execution {
    pub(crate) id: Uuid,
    total: usize,
    pending: VecDeque<RequestDraft>,
    retry: Vec<String>,
    in_flight: HashSet<String>,
    results: ResultsMap,
    pub(crate) waves: usize,
    pub(crate) backoff_cycles: usize,
}

impl Execution {
    /// Start an execution from freshly built drafts; duplicate ids are dropped
    pub(crate) fn new(drafts: Vec<RequestDraft>) -> Self {
        let mut seen = HashSet::new();
        let pending: VecDeque<RequestDraft> = drafts
            .into_iter()
            .filter(|draft| seen.insert(draft.id().to_string()))
            .collect();

        Self {
            id: Uuid::new_v4(),
            total: pending.len(),
            pending,
            retry: Vec::new(),
            in_flight: HashSet::new(),
            results: ResultsMap::new(),
            waves: 0,
            backoff_cycles: 0,
        }
    }

    pub(crate) fn total(&self) -> usize {
        self.total
    }

    pub(crate) fn results(&self) -> &ResultsMap {
        &self.results
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn retry_len(&self) -> usize {
        self.retry.len()
    }

    /// Entries still waiting for a wave
    pub(crate) fn queued(&self) -> usize {
        self.pending.len() + self.retry.len()
    }

    /// Rebuild drafts for the retry queue and append them to pending
    pub(crate) fn merge_retry(&mut self, builder: &RequestBuilder, token: &str) -> Result<()> {
        if self.retry.is_empty() {
            return Ok(());
        }
        let drafts = builder.build_all(&self.retry, token)?;
        self.retry.clear();
        self.pending.extend(drafts);
        Ok(())
    }

    /// Move up to `max` drafts from the front of pending into flight
    pub(crate) fn cut_wave(&mut self, max: usize) -> Vec<RequestDraft> {
        let size = max.min(self.pending.len());
        let wave: Vec<RequestDraft> = self.pending.drain(..size).collect();
        for draft in &wave {
            self.in_flight.insert(draft.id().to_string());
        }
        self.waves += 1;
        wave
    }

    /// Record a terminal result for an in-flight id
    pub(crate) fn record(&mut self, record: ResultRecord) {
        if self.in_flight.remove(&record.id) {
            self.results.insert(record.id.clone(), record);
        }
        debug_assert!(self.snapshot().is_consistent());
    }

    /// Bounce an in-flight id to the retry queue
    pub(crate) fn requeue_retry(&mut self, id: &str) {
        if self.in_flight.remove(id) {
            self.retry.push(id.to_string());
        }
        debug_assert!(self.snapshot().is_consistent());
    }

    /// Put an in-flight draft back as unattempted
    pub(crate) fn return_to_pending(&mut self, draft: RequestDraft) {
        if self.in_flight.remove(draft.id()) {
            self.pending.push_back(draft);
        }
        debug_assert!(self.snapshot().is_consistent());
    }

    /// Ids that are still in flight after every settlement arrived
    pub(crate) fn stranded(&self) -> Vec<String> {
        self.in_flight.iter().cloned().collect()
    }

    pub(crate) fn snapshot(&self) -> ExecutionSnapshot {
        ExecutionSnapshot {
            total: self.total,
            results: self.results.len(),
            pending: self.pending.len(),
            retry: self.retry.len(),
            in_flight: self.in_flight.len(),
        }
    }

    pub(crate) fn into_report(self, state: SchedulerState) -> ExecutionReport {
        let mut unresolved: Vec<String> = self
            .pending
            .iter()
            .map(|draft| draft.id().to_string())
            .chain(self.retry.iter().cloned())
            .chain(self.in_flight.iter().cloned())
            .collect();
        unresolved.sort();

        let mut results: Vec<ResultRecord> = self.results.into_values().collect();
        results.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at).then_with(|| a.id.cmp(&b.id)));

        ExecutionReport {
            execution_id: self.id,
            state,
            total: self.total,
            results,
            unresolved,
            waves: self.waves,
            backoff_cycles: self.backoff_cycles,
        }
    }
}
