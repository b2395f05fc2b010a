//! Human-readable statistics report

use std::fmt::Write;

use crate::models::{Bucket, RunSummary};

fn heading(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Solved => "Solved cases",
        Bucket::Timeout => "Timeout cases",
        Bucket::Error => "Error cases",
        Bucket::Unsolved => "Unsolved cases",
    }
}

fn label(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Solved => "Solved",
        Bucket::Timeout => "Timeout",
        Bucket::Error => "Error",
        Bucket::Unsolved => "Unsolved",
    }
}

/// Render counts and percentages, then one line per case in each non-empty bucket.
///
/// Timed buckets use `case_id - outcome (1.23s)`; the error bucket uses
/// `case_id - error`.
pub fn render_stats(summary: &RunSummary) -> String {
    let mut out = String::new();
    let title = format!("{} results", summary.experiment);

    // Writing into a String cannot fail
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    let _ = writeln!(out, "Total cases: {}", summary.total_cases);
    for bucket in Bucket::ALL {
        let _ = writeln!(
            out,
            "{}: {} ({:.1}%)",
            label(bucket),
            summary.count(bucket),
            summary.percentage(bucket)
        );
    }

    for bucket in Bucket::ALL {
        if summary.count(bucket) == 0 {
            continue;
        }
        let _ = writeln!(out, "\n{}:", heading(bucket));
        for record in summary.bucket(bucket) {
            if bucket == Bucket::Error {
                let _ = writeln!(out, "  {} - error", record.case_id);
            } else {
                let _ = writeln!(
                    out,
                    "  {} - {} ({:.2}s)",
                    record.case_id, record.outcome, record.elapsed_seconds
                );
            }
        }
    }

    out
}
