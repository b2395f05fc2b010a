//! Structured (JSON) report

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Bucket, CaseRecord, Percentages, RunSummary};

/// Fixed report schema; field order is the document order
#[derive(Debug, Serialize)]
struct StructuredReport<'a> {
    experiment: &'a str,
    timeout: u64,
    grace: f64,
    total_cases: usize,
    solved_count: usize,
    safe_count: usize,
    unsafe_count: usize,
    timeout_count: usize,
    error_count: usize,
    unsolved_count: usize,
    percentages: Percentages,
    solved_cases: Vec<String>,
    timeout_cases: Vec<String>,
    error_cases: Vec<String>,
    unsolved_cases: Vec<String>,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    wall_seconds: f64,
    detailed_results: &'a [CaseRecord],
}

impl<'a> From<&'a RunSummary> for StructuredReport<'a> {
    fn from(summary: &'a RunSummary) -> Self {
        Self {
            experiment: &summary.experiment,
            timeout: summary.timeout_secs,
            grace: summary.grace_secs,
            total_cases: summary.total_cases,
            solved_count: summary.solved_count,
            safe_count: summary.safe_count,
            unsafe_count: summary.unsafe_count,
            timeout_count: summary.timeout_count,
            error_count: summary.error_count,
            unsolved_count: summary.unsolved_count,
            percentages: summary.percentages(),
            solved_cases: summary.case_ids(Bucket::Solved),
            timeout_cases: summary.case_ids(Bucket::Timeout),
            error_cases: summary.case_ids(Bucket::Error),
            unsolved_cases: summary.case_ids(Bucket::Unsolved),
            started_at: summary.started_at,
            finished_at: summary.finished_at,
            wall_seconds: summary.wall_seconds(),
            detailed_results: &summary.records,
        }
    }
}

/// Render the full structured report as pretty-printed JSON
pub fn render_json(summary: &RunSummary) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&StructuredReport::from(summary))
        .context("Failed to serialize structured report")?;
    json.push('\n');
    Ok(json)
}
