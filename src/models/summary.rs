use chrono::{DateTime, Utc};
use serde::Serialize;

use super::case::{CaseRecord, Outcome};

/// Report partition a case is counted in.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Safe or unsafe verdicts
    Solved,
    Timeout,
    Error,
    /// Completed without a recognizable verdict
    Unsolved,
}

impl Bucket {
    /// Reporting order of the buckets.
    pub const ALL: [Bucket; 4] = [
        Bucket::Solved,
        Bucket::Timeout,
        Bucket::Error,
        Bucket::Unsolved,
    ];

    pub fn of(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Safe | Outcome::Unsafe => Bucket::Solved,
            Outcome::Timeout => Bucket::Timeout,
            Outcome::Error => Bucket::Error,
            Outcome::Unknown => Bucket::Unsolved,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Solved => "solved",
            Bucket::Timeout => "timeout",
            Bucket::Error => "error",
            Bucket::Unsolved => "unsolved",
        }
    }
}

/// Bucket share of the total, as a percentage rounded to one decimal place.
///
/// Returns 0.0 for an empty run; callers stop before that can happen.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}

/// Per-bucket percentages of the total case count.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Percentages {
    pub solved: f64,
    pub timeout: f64,
    pub error: f64,
    pub unsolved: f64,
}

/// Aggregate view of one harness execution, built once after the last case.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub experiment: String,
    pub timeout_secs: u64,
    pub grace_secs: f64,
    pub total_cases: usize,
    pub solved_count: usize,
    pub safe_count: usize,
    pub unsafe_count: usize,
    pub timeout_count: usize,
    pub error_count: usize,
    pub unsolved_count: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Every record, in discovery order
    pub records: Vec<CaseRecord>,
}

impl RunSummary {
    pub fn count(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::Solved => self.solved_count,
            Bucket::Timeout => self.timeout_count,
            Bucket::Error => self.error_count,
            Bucket::Unsolved => self.unsolved_count,
        }
    }

    pub fn percentage(&self, bucket: Bucket) -> f64 {
        percentage(self.count(bucket), self.total_cases)
    }

    pub fn percentages(&self) -> Percentages {
        Percentages {
            solved: self.percentage(Bucket::Solved),
            timeout: self.percentage(Bucket::Timeout),
            error: self.percentage(Bucket::Error),
            unsolved: self.percentage(Bucket::Unsolved),
        }
    }

    /// Records of one bucket, in discovery order.
    pub fn bucket(&self, bucket: Bucket) -> impl Iterator<Item = &CaseRecord> {
        self.records
            .iter()
            .filter(move |r| Bucket::of(r.outcome) == bucket)
    }

    pub fn case_ids(&self, bucket: Bucket) -> Vec<String> {
        self.bucket(bucket).map(|r| r.case_id.clone()).collect()
    }

    /// Wall-clock span of the whole batch in seconds.
    pub fn wall_seconds(&self) -> f64 {
        (self.finished_at - self.started_at)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}
