//! Whole-word verdict markers

use anyhow::{Context, Result};
use regex::Regex;

/// A compiled set of marker tokens.
///
/// A token matches case-insensitively, and only when it is not glued to a word
/// character or a hyphen on either side. `safe` therefore does not match
/// `unsafe`, `--safe-mode` or `counter_safe_1`, and `timeout` does not match
/// an echoed `--timeout` flag.
///
/// The same rule hides verdicts glued to a hyphen: `avr-cea` or `result-safe`
/// match neither `cea` nor `safe`. Such forms need their own marker, e.g.
/// `unsafe = ["unsafe", "cea", "avr-cea"]`.
#[derive(Debug, Clone)]
pub struct MarkerSet {
    regex: Option<Regex>,
}

impl MarkerSet {
    pub fn new<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        if tokens.is_empty() {
            return Ok(Self { regex: None });
        }

        let alternatives: Vec<String> = tokens
            .iter()
            .map(|t| regex::escape(t.as_ref().trim()))
            .collect();
        let pattern = format!(
            r"(?i)(?:^|[^\w-])(?:{})(?:$|[^\w-])",
            alternatives.join("|")
        );
        let regex =
            Regex::new(&pattern).with_context(|| format!("Invalid marker pattern: {pattern}"))?;
        Ok(Self { regex: Some(regex) })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|r| r.is_match(text))
    }
}
