//! Human-readable progress summaries

use crate::core::scheduler::{ResultRecord, ResultsMap};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Tally bucket: a status code, or the absence of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum TallyKey {
    Status(u16),
    Network,
}

impl TallyKey {
    fn of(record: &ResultRecord) -> Self {
        match record.status {
            Some(code) => Self::Status(code),
            None => Self::Network,
        }
    }

    fn label(&self) -> Cow<'static, str> {
        match self {
            Self::Status(code) => status_name(*code),
            Self::Network => Cow::Borrowed("Network Error"),
        }
    }
}

/// Display name for a status code
pub fn status_name(code: u16) -> Cow<'static, str> {
    match code {
        200 => Cow::Borrowed("OK"),
        401 => Cow::Borrowed("Unauthorized"),
        403 => Cow::Borrowed("Forbidden"),
        404 => Cow::Borrowed("Not Found"),
        429 => Cow::Borrowed("Too Many Requests"),
        other => Cow::Owned(other.to_string()),
    }
}

/// Position of the current wave within the execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveHeader {
    pub total: usize,
    /// 1-based wave number
    pub wave: usize,
    /// Waves needed without any retries
    pub planned_waves: usize,
    /// Entries left queued after this wave was cut
    pub pending: usize,
}

impl WaveHeader {
    pub fn render(&self) -> String {
        format!(
            "total: {}\nchunk: {}/{}\npending: {}\n",
            self.total, self.wave, self.planned_waves, self.pending
        )
    }
}

/// Trailing line appended to a status text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSuffix {
    Done,
    Aborted,
    /// Seconds left in the backoff countdown
    Countdown(u64),
}

impl StatusSuffix {
    pub fn render(&self) -> String {
        match self {
            Self::Done => "\nDONE".to_string(),
            Self::Aborted => "\nABORTED".to_string(),
            Self::Countdown(seconds) => {
                format!("\nhit rate limit.\ncontinuing in {}s…", seconds)
            }
        }
    }
}

/// Stateless status formatter
pub struct StatusReporter;

impl StatusReporter {
    /// Tally of all results plus progress of the active wave
    ///
    /// Returns an empty string while there are no results.
    pub fn report<F>(results: &ResultsMap, wave_size: usize, progress: F) -> String
    where
        F: Fn() -> usize,
    {
        if results.is_empty() {
            return String::new();
        }

        let mut tally: BTreeMap<TallyKey, usize> = BTreeMap::new();
        for record in results.values() {
            *tally.entry(TallyKey::of(record)).or_insert(0) += 1;
        }

        let lines: Vec<String> = tally
            .iter()
            .map(|(key, count)| format!("{} × {}", key.label(), count))
            .collect();

        format!(
            "responses: {}\ncurrent: {}/{}\n\n{}\n",
            results.len(),
            progress(),
            wave_size,
            lines.join("\n")
        )
    }

    /// Header, report and optional suffix as one block of text
    pub fn compose<F>(
        header: &WaveHeader,
        results: &ResultsMap,
        wave_size: usize,
        progress: F,
        suffix: Option<StatusSuffix>,
    ) -> String
    where
        F: Fn() -> usize,
    {
        let mut text = header.render();
        text.push_str(&Self::report(results, wave_size, progress));
        if let Some(suffix) = suffix {
            text.push_str(&suffix.render());
        }
        text
    }
}
