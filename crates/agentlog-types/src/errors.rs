//! Error types for agentlog operations.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for agentlog operations.
///
/// Only [`LoggerError::OpenLogFile`] can come out of logger initialization.
/// The remaining variants cover configuration loading and the tracing bridge.
#[derive(Error, Debug)]
pub enum LoggerError {
    /// The log file could not be opened for append
    #[error("failed to open log file {}: {source}", path.display())]
    OpenLogFile {
        /// Path that was being opened
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// I/O error while writing or flushing a sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A level name rejected by the strict parser
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// A global tracing subscriber could not be installed
    #[error("Subscriber error: {0}")]
    Subscriber(String),
}

/// A specialized Result type for agentlog operations.
pub type Result<T> = std::result::Result<T, LoggerError>;
