//! Atomic report file writes

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `contents` to `path` via a temp file in the same directory and a rename.
///
/// Readers never observe a half-written report. Missing parent directories
/// are created.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory {}", parent.display()))?;

    let mut staging = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
    staging
        .write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    staging
        .as_file()
        .sync_all()
        .with_context(|| format!("Failed to sync {}", path.display()))?;
    staging
        .persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move report into place at {}", path.display()))?;
    Ok(())
}
