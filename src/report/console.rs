//! Console progress and final summary

use colored::Colorize;
use std::io::Write;

use super::ReportPaths;
use crate::config::HarnessConfig;
use crate::models::{Bucket, CaseRecord, RunSummary};

/// Solved cases listed in the final summary before eliding the rest
pub const MAX_LISTED_SOLVED: usize = 10;

/// Characters of fault text shown on a progress line
const FAULT_PREVIEW_CHARS: usize = 50;

const RULE_WIDTH: usize = 60;

/// Collapse `text` to one line of at most `max_chars` characters
pub fn truncate_for_display(text: &str, max_chars: usize) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() <= max_chars {
        return line;
    }
    let mut short: String = line.chars().take(max_chars).collect();
    short.push_str("...");
    short
}

pub fn render_header<W: Write>(w: &mut W, config: &HarnessConfig) -> std::io::Result<()> {
    writeln!(w, "{} {}", "→".cyan().bold(), config.experiment.bold())?;
    writeln!(w, "  Base directory:   {}", config.base_dir.display())?;
    writeln!(w, "  Corpus directory: {}", config.corpus_dir.display())?;
    writeln!(w, "  Output directory: {}", config.output_dir.display())?;
    writeln!(
        w,
        "  Timeout:          {}s (+{:.1}s grace)",
        config.timeout_secs,
        config.grace().as_secs_f64()
    )?;
    writeln!(w, "{}", "-".repeat(50).dimmed())?;
    Ok(())
}

pub fn render_discovered<W: Write>(w: &mut W, count: usize, suffix: &str) -> std::io::Result<()> {
    if count == 0 {
        writeln!(
            w,
            "{} No input files ending in '{}' found; nothing to run.",
            "!".yellow().bold(),
            suffix
        )
    } else {
        writeln!(w, "Found {count} input files")
    }
}

/// First half of a progress line, flushed before the tool starts
pub fn render_case_start<W: Write>(
    w: &mut W,
    index: usize,
    total: usize,
    case_id: &str,
) -> std::io::Result<()> {
    writeln!(w, "\n[{index}/{total}] {case_id}")?;
    w.flush()
}

pub fn render_case_result<W: Write>(w: &mut W, record: &CaseRecord) -> std::io::Result<()> {
    let timing = format!("({:.2}s)", record.elapsed_seconds);
    match Bucket::of(record.outcome) {
        Bucket::Solved => writeln!(
            w,
            "  {} {} {}",
            "✓".green().bold(),
            record.outcome.as_str().green(),
            timing
        ),
        Bucket::Timeout => writeln!(
            w,
            "  {} {} {}",
            "⏱".yellow(),
            "timeout".yellow(),
            timing
        ),
        Bucket::Error => writeln!(
            w,
            "  {} {}: {}",
            "✗".red().bold(),
            "error".red(),
            truncate_for_display(&record.stderr, FAULT_PREVIEW_CHARS)
        ),
        Bucket::Unsolved => writeln!(
            w,
            "  {} {} {}",
            "✗".red(),
            record.outcome.as_str().dimmed(),
            timing
        ),
    }
}

fn bucket_label(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Solved => "Solved",
        Bucket::Timeout => "Timeout",
        Bucket::Error => "Error",
        Bucket::Unsolved => "Unsolved",
    }
}

/// Final tabulated summary with per-bucket listings
pub fn render_summary<W: Write>(
    w: &mut W,
    summary: &RunSummary,
    paths: &ReportPaths,
) -> std::io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(w, "\n{rule}")?;
    writeln!(w, "{} {}", "Run complete:".bold(), summary.experiment)?;
    writeln!(w, "{rule}")?;
    writeln!(w, "{:<10} {:>5}", "Total", summary.total_cases)?;
    for bucket in Bucket::ALL {
        let line = format!(
            "{:<10} {:>5} ({:>5.1}%)",
            bucket_label(bucket),
            summary.count(bucket),
            summary.percentage(bucket)
        );
        let line = match bucket {
            Bucket::Solved => line.green(),
            Bucket::Timeout => line.yellow(),
            Bucket::Error | Bucket::Unsolved => line.red(),
        };
        writeln!(w, "{line}")?;
    }
    writeln!(w, "Wall time: {:.2}s", summary.wall_seconds())?;
    writeln!(w, "Detailed results: {}", paths.results.display())?;
    writeln!(w, "Statistics:       {}", paths.stats.display())?;

    if summary.solved_count > 0 {
        writeln!(w, "\n{} ({}):", "Solved cases".green().bold(), summary.solved_count)?;
        for record in summary.bucket(Bucket::Solved).take(MAX_LISTED_SOLVED) {
            writeln!(
                w,
                "  - {} ({}, {:.2}s)",
                record.case_id, record.outcome, record.elapsed_seconds
            )?;
        }
        if summary.solved_count > MAX_LISTED_SOLVED {
            writeln!(w, "  ... and {} more", summary.solved_count - MAX_LISTED_SOLVED)?;
        }
    }

    for bucket in [Bucket::Timeout, Bucket::Error, Bucket::Unsolved] {
        let count = summary.count(bucket);
        if count == 0 {
            continue;
        }
        let heading = format!("{} cases", bucket_label(bucket));
        writeln!(w, "\n{} ({count}):", heading.bold())?;
        for record in summary.bucket(bucket) {
            if bucket == Bucket::Unsolved {
                writeln!(w, "  - {} ({})", record.case_id, record.outcome)?;
            } else {
                writeln!(w, "  - {}", record.case_id)?;
            }
        }
    }

    Ok(())
}
