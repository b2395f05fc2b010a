//! Aggregator and reporters
//!
//! Records flow into an [`Aggregator`] as each case resolves. Once the last
//! case is in, the resulting [`RunSummary`](crate::models::RunSummary) is
//! written to two sinks:
//! - a structured JSON document with every record ([`json`])
//! - a plain-text statistics summary ([`text`])
//!
//! Console progress and the closing summary live in [`console`].

mod aggregate;
pub mod console;
pub mod json;
mod sink;
pub mod text;

pub use aggregate::Aggregator;
pub use sink::write_atomic;

use anyhow::Result;
use std::path::PathBuf;

use crate::config::HarnessConfig;
use crate::models::RunSummary;

/// Destinations of the two report sinks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub results: PathBuf,
    pub stats: PathBuf,
}

impl ReportPaths {
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            results: config.results_path.clone(),
            stats: config.stats_path.clone(),
        }
    }
}

/// Persist both sinks
pub fn write_reports(summary: &RunSummary, paths: &ReportPaths) -> Result<()> {
    write_atomic(&paths.results, &json::render_json(summary)?)?;
    write_atomic(&paths.stats, &text::render_stats(summary))?;
    tracing::info!(
        results = %paths.results.display(),
        stats = %paths.stats.display(),
        "reports written"
    );
    Ok(())
}
