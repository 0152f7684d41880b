//! Logger configuration.
//!
//! Values are resolved in this priority order:
//! 1. Environment variables (`AGENTLOG_LEVEL`, `AGENTLOG_FILE`)
//! 2. Values loaded from a YAML file
//! 3. Default values (`info`, no log file)
//!
//! ## Example
//!
//! ```no_run
//! use agentlog_types::LoggerConfig;
//!
//! let config = LoggerConfig::load("config/logging.yml")?.with_env_overrides();
//! println!("level={} file={:?}", config.level, config.file);
//! # Ok::<(), agentlog_types::LoggerError>(())
//! ```

use crate::errors::{LoggerError, Result};
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overriding the level.
pub const LEVEL_ENV: &str = "AGENTLOG_LEVEL";

/// Environment variable overriding the log file path.
pub const FILE_ENV: &str = "AGENTLOG_FILE";

/// Level and output settings for the process logger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Threshold text, parsed leniently (unknown values mean `info`)
    #[serde(default = "default_level")]
    pub level: String,

    /// Log file path; empty means console only
    #[serde(default)]
    pub file: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl LoggerConfig {
    /// Configuration with explicit values.
    pub fn new(level: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            file: file.into(),
        }
    }

    /// Load configuration from a YAML file.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            LoggerError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text. Empty text yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply `AGENTLOG_LEVEL` / `AGENTLOG_FILE` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(LEVEL_ENV) {
            self.level = level;
        }
        if let Some(file) = lookup(FILE_ENV) {
            self.file = file;
        }
        self
    }

    /// Threshold this configuration resolves to.
    pub fn severity(&self) -> Severity {
        Severity::parse_or_default(&self.level)
    }

    /// Whether a file sink is configured.
    pub fn has_file(&self) -> bool {
        !self.file.is_empty()
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: String::new(),
        }
    }
}
