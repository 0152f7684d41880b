//! # agentlog Core
//!
//! Process-wide structured logging for the agent server.
//!
//! This crate provides:
//!
//! - **Facade**: `init`, `sync`, and `debug` / `info` / `warn` / `error` /
//!   `fatal` free functions over one process-wide logger
//! - **Sinks**: colourised console lines and append-only JSON-lines files,
//!   fanned out through a [`sink::Tee`]
//! - **Logger handles**: named and field-scoped child loggers
//! - **Tracing bridge**: a `tracing-subscriber` layer feeding the same sinks
//!
//! ## Example
//!
//! ```rust,no_run
//! use agentlog_core::Field;
//!
//! if let Err(e) = agentlog_core::init("info", "logs/app.log") {
//!     eprintln!("Failed to initialize logger: {}", e);
//!     std::process::exit(1);
//! }
//!
//! agentlog_core::info(
//!     "Starting Agent Server",
//!     &[Field::string("name", "agent-1"), Field::int("grpc_port", 9090)],
//! );
//!
//! agentlog_core::sync();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bridge;
pub mod builder;
pub mod encoder;
pub mod global;
pub mod logger;
pub mod record;
pub mod sink;

// Re-export commonly used items
pub use agentlog_types::{Field, FieldValue, LoggerConfig, LoggerError, Result, Severity};
pub use global::{
    debug, error, fatal, handle, info, init, init_from_config, install, logger, sync, warn,
    LoggerHandle,
};
pub use logger::Logger;
