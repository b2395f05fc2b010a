//! Harness configuration
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! command-line overrides applied by the `run` command.
//!
//! ```toml
//! experiment = "AVR Crafted Cases"
//! corpus_dir = "tests/crafted"
//! suffix = ".v"
//! tool = ["python", "avr.py"]
//! timeout_secs = 1
//! grace_ms = 5000
//!
//! [markers]
//! safe = ["safe"]
//! unsafe = ["unsafe", "cea"]
//! timeout = ["timeout", "timed out"]
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default tool-side timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 1;

/// Default extra time granted on top of the tool timeout before the harness kills it
pub const DEFAULT_GRACE: Duration = Duration::from_secs(5);

/// Default input-file suffix
pub const DEFAULT_SUFFIX: &str = ".v";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no verification tool configured (set `tool` in the config file or pass it after `--`)")]
    MissingTool,

    #[error("input-file suffix must not be empty")]
    EmptySuffix,

    #[error("{kind} marker list contains a blank entry")]
    BlankMarker { kind: &'static str },
}

/// Verdict marker tokens matched against tool stdout.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerConfig {
    #[serde(rename = "safe")]
    pub safe_markers: Vec<String>,
    #[serde(rename = "unsafe")]
    pub unsafe_markers: Vec<String>,
    #[serde(rename = "timeout")]
    pub timeout_phrases: Vec<String>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            safe_markers: vec!["safe".to_string()],
            unsafe_markers: vec!["unsafe".to_string(), "cea".to_string()],
            timeout_phrases: vec!["timeout".to_string(), "timed out".to_string()],
        }
    }
}

/// Complete configuration for one harness execution
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Experiment name written into the structured report
    pub experiment: String,
    /// Root of the input corpus
    pub corpus_dir: PathBuf,
    /// Input-file suffix, including the dot
    pub suffix: String,
    /// Tool program followed by any leading arguments
    pub tool: Vec<String>,
    /// Timeout passed to the tool via `--timeout`
    pub timeout_secs: u64,
    /// Extra time before the harness kills the tool
    pub grace_ms: u64,
    /// Directory handed to the tool via `-o`
    pub output_dir: PathBuf,
    /// Working directory of the tool
    pub base_dir: PathBuf,
    pub results_path: PathBuf,
    pub stats_path: PathBuf,
    pub markers: MarkerConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            experiment: "Verification Experiment".to_string(),
            corpus_dir: PathBuf::from("tests/crafted"),
            suffix: DEFAULT_SUFFIX.to_string(),
            tool: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            grace_ms: DEFAULT_GRACE.as_millis() as u64,
            output_dir: PathBuf::from("harness_output"),
            base_dir: PathBuf::from("."),
            results_path: PathBuf::from("harness_results.json"),
            stats_path: PathBuf::from("harness_stats.txt"),
            markers: MarkerConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Load a config file, filling unset keys with defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check invariants the pipeline relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tool.first().map_or(true, |p| p.trim().is_empty()) {
            return Err(ConfigError::MissingTool);
        }
        if self.suffix.is_empty() {
            return Err(ConfigError::EmptySuffix);
        }
        let lists = [
            ("safe", &self.markers.safe_markers),
            ("unsafe", &self.markers.unsafe_markers),
            ("timeout", &self.markers.timeout_phrases),
        ];
        for (kind, list) in lists {
            if list.iter().any(|m| m.trim().is_empty()) {
                return Err(ConfigError::BlankMarker { kind });
            }
        }
        Ok(())
    }

    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }

    /// Harness-enforced ceiling on a single invocation: tool timeout plus grace.
    ///
    /// Saturates at `Duration::MAX` for out-of-range values.
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.timeout_secs).saturating_add(self.grace())
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub experiment: Option<String>,
    pub corpus_dir: Option<PathBuf>,
    pub suffix: Option<String>,
    pub tool: Vec<String>,
    pub timeout_secs: Option<u64>,
    pub grace_ms: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub base_dir: Option<PathBuf>,
    pub results_path: Option<PathBuf>,
    pub stats_path: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Build the effective config: defaults, then `config_file`, then overrides
    pub fn resolve(self, config_file: Option<&Path>) -> Result<HarnessConfig, ConfigError> {
        let base = match config_file {
            Some(path) => HarnessConfig::load(path)?,
            None => HarnessConfig::default(),
        };
        Ok(self.apply(base))
    }

    pub fn apply(self, mut config: HarnessConfig) -> HarnessConfig {
        if let Some(v) = self.experiment {
            config.experiment = v;
        }
        if let Some(v) = self.corpus_dir {
            config.corpus_dir = v;
        }
        if let Some(v) = self.suffix {
            config.suffix = v;
        }
        if !self.tool.is_empty() {
            config.tool = self.tool;
        }
        if let Some(v) = self.timeout_secs {
            config.timeout_secs = v;
        }
        if let Some(v) = self.grace_ms {
            config.grace_ms = v;
        }
        if let Some(v) = self.output_dir {
            config.output_dir = v;
        }
        if let Some(v) = self.base_dir {
            config.base_dir = v;
        }
        if let Some(v) = self.results_path {
            config.results_path = v;
        }
        if let Some(v) = self.stats_path {
            config.stats_path = v;
        }
        config
    }
}
