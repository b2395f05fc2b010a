//! Explicit result accumulator

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::models::{Bucket, CaseRecord, Outcome, RunSummary};

/// Accumulates case records in resolution order.
///
/// Consumed and returned by [`Aggregator::absorb`] so a run can be expressed
/// as a fold over its records; [`Aggregator::finish`] seals it into a
/// [`RunSummary`].
#[derive(Debug, Clone)]
pub struct Aggregator {
    experiment: String,
    timeout_secs: u64,
    grace: Duration,
    started_at: DateTime<Utc>,
    records: Vec<CaseRecord>,
    solved: usize,
    safe: usize,
    unsafe_: usize,
    timeout: usize,
    error: usize,
    unsolved: usize,
}

impl Aggregator {
    pub fn new(experiment: impl Into<String>, timeout_secs: u64, grace: Duration) -> Self {
        Self {
            experiment: experiment.into(),
            timeout_secs,
            grace,
            started_at: Utc::now(),
            records: Vec::new(),
            solved: 0,
            safe: 0,
            unsafe_: 0,
            timeout: 0,
            error: 0,
            unsolved: 0,
        }
    }

    /// Append one finalized record
    pub fn absorb(mut self, record: CaseRecord) -> Self {
        match Bucket::of(record.outcome) {
            Bucket::Solved => self.solved += 1,
            Bucket::Timeout => self.timeout += 1,
            Bucket::Error => self.error += 1,
            Bucket::Unsolved => self.unsolved += 1,
        }
        match record.outcome {
            Outcome::Safe => self.safe += 1,
            Outcome::Unsafe => self.unsafe_ += 1,
            _ => {}
        }
        self.records.push(record);
        self
    }

    pub fn finish(self) -> RunSummary {
        RunSummary {
            experiment: self.experiment,
            timeout_secs: self.timeout_secs,
            grace_secs: self.grace.as_secs_f64(),
            total_cases: self.records.len(),
            solved_count: self.solved,
            safe_count: self.safe,
            unsafe_count: self.unsafe_,
            timeout_count: self.timeout,
            error_count: self.error,
            unsolved_count: self.unsolved,
            started_at: self.started_at,
            finished_at: Utc::now(),
            records: self.records,
        }
    }
}
