use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Return code recorded when the child was killed, died from a signal, or never started.
pub const NO_RETURN_CODE: i32 = -1;

/// Outcome assigned to a single case.
///
/// `Safe` and `Unsafe` are definitive verdicts reached by the tool. `Timeout`,
/// `Unknown` and `Error` are the three recoverable failure kinds:
/// - `Timeout`: the harness deadline expired, or the tool reported a timeout / non-zero exit
/// - `Error`: the tool could not be launched or waited on
/// - `Unknown`: the tool finished cleanly without printing a recognizable verdict
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Safe,
    Unsafe,
    Timeout,
    Error,
    Unknown,
}

impl Outcome {
    /// True for the definitive verdicts.
    pub fn is_definitive(self) -> bool {
        matches!(self, Outcome::Safe | Outcome::Unsafe)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Safe => "safe",
            Outcome::Unsafe => "unsafe",
            Outcome::Timeout => "timeout",
            Outcome::Error => "error",
            Outcome::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered input file, ready to be invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseSpec {
    pub case_id: String,
    pub source_path: PathBuf,
}

impl CaseSpec {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let source_path = path.into();
        Self {
            case_id: derive_case_id(&source_path),
            source_path,
        }
    }
}

/// Derive the case identifier `<parent dir name>_<file stem>`.
///
/// Files without a named parent (e.g. a bare `foo.v`) use the stem alone.
/// Identifiers are not guaranteed unique across a corpus.
pub fn derive_case_id(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match path
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy())
    {
        Some(dir) if !dir.is_empty() => format!("{dir}_{stem}"),
        _ => stem,
    }
}

/// Finalized record for one case.
///
/// Field names on the wire follow the structured report schema
/// (`case`, `file`, `success`, `result`, `runtime`, `returncode`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseRecord {
    #[serde(rename = "case")]
    pub case_id: String,
    #[serde(rename = "file", serialize_with = "serialize_path_lossy")]
    pub source_path: PathBuf,
    #[serde(rename = "result")]
    pub outcome: Outcome,
    #[serde(rename = "success")]
    pub succeeded: bool,
    #[serde(rename = "runtime")]
    pub elapsed_seconds: f64,
    #[serde(rename = "returncode")]
    pub return_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CaseRecord {
    /// Build a record; `succeeded` is derived from the outcome so the two never disagree.
    pub fn new(
        spec: &CaseSpec,
        outcome: Outcome,
        elapsed: Duration,
        return_code: i32,
        stdout: String,
        stderr: String,
    ) -> Self {
        Self {
            case_id: spec.case_id.clone(),
            source_path: spec.source_path.clone(),
            outcome,
            succeeded: outcome.is_definitive(),
            elapsed_seconds: elapsed.as_secs_f64(),
            return_code,
            stdout,
            stderr,
        }
    }

    /// Record for a case whose tool could not be launched or waited on.
    pub fn launch_fault(spec: &CaseSpec, description: impl Into<String>) -> Self {
        Self::new(
            spec,
            Outcome::Error,
            Duration::ZERO,
            NO_RETURN_CODE,
            String::new(),
            description.into(),
        )
    }

    /// Record for a case killed at the harness deadline.
    pub fn expired(spec: &CaseSpec, elapsed: Duration) -> Self {
        Self::new(
            spec,
            Outcome::Timeout,
            elapsed,
            NO_RETURN_CODE,
            String::new(),
            String::new(),
        )
    }
}

/// Paths are written as text; bytes that are not valid UTF-8 become U+FFFD
fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}
