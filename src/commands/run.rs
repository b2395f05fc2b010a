use anyhow::{Context, Result};
use std::io;
use std::path::Path;

use crate::config::ConfigOverrides;
use crate::harness;

/// Run the whole corpus through the verification tool and write both reports
/// Usage: verirun run [--config <file>] [options] -- <tool> [tool args...]
pub fn execute(overrides: ConfigOverrides, config_file: Option<&Path>) -> Result<()> {
    let config = overrides
        .resolve(config_file)
        .context("Failed to load harness configuration")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match harness::run(&config, &mut out)? {
        Some(summary) => tracing::debug!(
            total = summary.total_cases,
            solved = summary.solved_count,
            "run finished"
        ),
        None => tracing::debug!("empty corpus, no reports written"),
    }
    Ok(())
}
