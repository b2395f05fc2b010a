//! Batch pipeline
//!
//! Scanner → Invoker → Classifier → Aggregator, one case at a time in
//! discovery order. Each case is fully resolved before the next starts.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;

use crate::classify::Classifier;
use crate::config::HarnessConfig;
use crate::corpus;
use crate::invoke::Invoker;
use crate::models::{CaseRecord, CaseSpec, RunSummary};
use crate::report::{console, write_reports, Aggregator, ReportPaths};

/// Run every case through `resolve`, folding the records into `aggregator`.
///
/// `resolve` must return a finalized record and never fail; the batch always
/// runs to the last case. Progress goes to `out` on a best-effort basis.
pub fn run_cases<W, F>(
    cases: &[CaseSpec],
    aggregator: Aggregator,
    mut resolve: F,
    out: &mut W,
) -> RunSummary
where
    W: Write,
    F: FnMut(&CaseSpec) -> CaseRecord,
{
    let total = cases.len();
    let mut aggregator = aggregator;

    for (i, case) in cases.iter().enumerate() {
        // Console failures must not stop the batch
        let _ = console::render_case_start(out, i + 1, total, &case.case_id);
        let record = resolve(case);
        let _ = console::render_case_result(out, &record);
        aggregator = aggregator.absorb(record);
    }

    aggregator.finish()
}

/// Execute a full harness run.
///
/// Returns `Ok(None)` without writing any report when the corpus has no
/// input files. Errors are harness-level only (bad config, unwritable output
/// or report paths); per-case failures end up in the summary.
pub fn run<W: Write>(config: &HarnessConfig, out: &mut W) -> Result<Option<RunSummary>> {
    config.validate()?;
    let classifier = Classifier::new(&config.markers)?;
    let invoker = Invoker::from_config(config);

    console::render_header(out, config)?;
    let cases = corpus::discover(&config.corpus_dir, &config.suffix);
    console::render_discovered(out, cases.len(), &config.suffix)?;
    if cases.is_empty() {
        return Ok(None);
    }

    if let Some(warning) = invoker.preflight() {
        tracing::warn!("{warning}; every case will be recorded as an error");
    }
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let aggregator = Aggregator::new(&config.experiment, config.timeout_secs, config.grace());
    let summary = run_cases(
        &cases,
        aggregator,
        |case| classifier.resolve(case, invoker.invoke(case)),
        out,
    );

    let paths = ReportPaths::from_config(config);
    write_reports(&summary, &paths)?;
    console::render_summary(out, &summary, &paths)?;

    Ok(Some(summary))
}
