//! Driver configuration.
//!
//! Resolution order, later wins:
//!
//! 1. Built-in defaults (text output, demo script).
//! 2. YAML file passed with `--config`.
//! 3. Environment: `GEARBOX_FORMAT` (`text` or `json`).
//! 4. Command-line flags and positional actions.
//!
//! Steps 1-3 live here; step 4 is applied by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use gearbox_state::{Action, GearError};

/// Environment variable overriding the output format.
pub const FORMAT_ENV: &str = "GEARBOX_FORMAT";

/// Script replayed when neither the config file nor the command line names
/// any actions.
pub const DEMO_SCRIPT: [Action; 5] = [
    Action::Throttle,
    Action::ShiftUp,
    Action::Throttle,
    Action::Brake,
    Action::ShiftDown,
];

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One status message per line.
    #[default]
    Text,
    /// Final vehicle snapshot as pretty-printed JSON.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidFormat(other.to_string())),
        }
    }
}

/// Resolved driver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Output format.
    pub format: OutputFormat,
    /// Action names to replay, in order.
    pub script: Vec<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            script: DEMO_SCRIPT.iter().map(|a| a.name().to_string()).collect(),
        }
    }
}

impl DriverConfig {
    /// Parse a YAML document. Missing keys fall back to defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Apply overrides from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_env_lookup(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = lookup(FORMAT_ENV) {
            self.format = raw.parse()?;
        }
        Ok(self)
    }

    /// Parse every script entry. Fails on the first unknown action, before
    /// anything is replayed.
    pub fn actions(&self) -> Result<Vec<Action>, GearError> {
        self.script.iter().map(|s| s.parse()).collect()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid output format {0:?} (expected \"text\" or \"json\")")]
    InvalidFormat(String),
}
