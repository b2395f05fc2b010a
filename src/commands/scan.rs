use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::HashMap;
use std::path::Path;

use crate::config::ConfigOverrides;
use crate::corpus;

/// List the cases a run would execute, without invoking the tool
/// Usage: verirun scan [--config <file>] [--corpus <dir>] [--suffix <ext>]
pub fn execute(overrides: ConfigOverrides, config_file: Option<&Path>) -> Result<()> {
    let config = overrides
        .resolve(config_file)
        .context("Failed to load harness configuration")?;

    let cases = corpus::discover(&config.corpus_dir, &config.suffix);
    if cases.is_empty() {
        println!(
            "{} No input files ending in '{}' under {}",
            "!".yellow().bold(),
            config.suffix,
            config.corpus_dir.display()
        );
        return Ok(());
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for case in &cases {
        *seen.entry(case.case_id.as_str()).or_default() += 1;
    }

    for case in &cases {
        let marker = if seen[case.case_id.as_str()] > 1 {
            " (duplicate id)".yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "{:<40} {}{}",
            case.case_id,
            case.source_path.display(),
            marker
        );
    }
    println!("\n{} cases", cases.len());
    Ok(())
}
