//! Corpus discovery
//!
//! Walks the corpus root and collects every file carrying the input suffix.
//! Traversal goes through `glob`, which visits directories depth-first with
//! entries sorted by name, so the order is stable for an unchanged tree.

use glob::{glob_with, MatchOptions, Pattern};
use std::path::{Path, PathBuf};

use crate::models::CaseSpec;

/// Find all files below `root` (any depth) whose name ends with `suffix`.
///
/// Never fails: a missing root, a root that cannot be turned into a pattern,
/// or unreadable entries are logged and yield fewer (possibly zero) files.
pub fn scan(root: &Path, suffix: &str) -> Vec<PathBuf> {
    if !root.is_dir() {
        tracing::warn!(root = %root.display(), "corpus root is not a directory");
        return Vec::new();
    }

    let Some(root_str) = root.to_str() else {
        tracing::warn!(root = %root.display(), "corpus root is not valid UTF-8");
        return Vec::new();
    };

    let pattern = format!(
        "{}/**/*{}",
        Pattern::escape(root_str.trim_end_matches('/')),
        Pattern::escape(suffix)
    );
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let entries = match glob_with(&pattern, options) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(%pattern, error = %e, "invalid corpus pattern");
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(path = %e.path().display(), error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect()
}

/// Scan the corpus and derive a case for every file found
pub fn discover(root: &Path, suffix: &str) -> Vec<CaseSpec> {
    scan(root, suffix)
        .into_iter()
        .map(CaseSpec::from_path)
        .collect()
}
