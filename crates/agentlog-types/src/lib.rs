//! # agentlog Types
//!
//! Value types shared by every agentlog consumer.
//!
//! This crate provides:
//!
//! - [`Severity`]: the ordered record level and its lenient threshold parser
//! - [`Field`] / [`FieldValue`]: typed structured key/value pairs
//! - [`LoggerConfig`]: level and log file settings, from YAML or the environment
//! - [`LoggerError`] and the [`Result`] alias
//!
//! ## Example
//!
//! ```
//! use agentlog_types::{Field, Severity};
//!
//! assert_eq!(Severity::parse_or_default("warn"), Severity::Warn);
//! assert_eq!(Severity::parse_or_default("WARN"), Severity::Info);
//!
//! let port = Field::int("grpc_port", 9090);
//! assert_eq!(port.key, "grpc_port");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod errors;
pub mod field;
pub mod severity;

// Re-export common types for convenience
pub use config::LoggerConfig;
pub use errors::{LoggerError, Result};
pub use field::{Field, FieldValue};
pub use severity::Severity;
