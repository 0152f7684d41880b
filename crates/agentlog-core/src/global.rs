//! Process-wide logger state.
//!
//! [`LoggerHandle`] is the slot that holds the active logger. The process
//! uses one static handle through the free functions in this module; tests and
//! embedders can build their own isolated handles.
//!
//! ## Lifecycle
//!
//! The slot starts empty. [`LoggerHandle::initialize`] installs a logger and
//! replaces whatever was there before, including a fallback. If anything
//! logs before that, [`LoggerHandle::get_active`] installs the
//! [`production`](crate::builder::production) preset exactly once.

use crate::builder;
use crate::logger::Logger;
use agentlog_types::{Field, LoggerConfig, Result};
use once_cell::sync::Lazy;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};

/// A thread-safe slot holding the active logger.
#[derive(Debug, Default)]
pub struct LoggerHandle {
    slot: RwLock<Option<Logger>>,
}

impl LoggerHandle {
    /// Empty handle.
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Build a logger from level text and file path and install it.
    ///
    /// On error nothing is installed and the previous state is kept.
    pub fn initialize(&self, level: &str, file_path: &str) -> Result<()> {
        let logger = builder::build(level, file_path)?;
        self.install(logger);
        Ok(())
    }

    /// Build a logger from configuration and install it.
    pub fn initialize_from_config(&self, config: &LoggerConfig) -> Result<()> {
        let logger = builder::from_config(config)?;
        self.install(logger);
        Ok(())
    }

    /// Install `logger`, replacing any previous one.
    ///
    /// The previous logger is flushed. Its sinks, and any file they hold, are
    /// closed once the last clone handed out by [`get_active`](Self::get_active)
    /// is dropped.
    pub fn install(&self, logger: Logger) {
        let previous = self.slot.write().replace(logger);
        if let Some(previous) = previous {
            let _ = previous.flush();
        }
    }

    /// The installed logger, installing the fallback preset on first use.
    pub fn get_active(&self) -> Logger {
        if let Some(logger) = self.slot.read().as_ref() {
            return logger.clone();
        }

        let guard = self.slot.upgradable_read();
        if let Some(logger) = guard.as_ref() {
            return logger.clone();
        }
        let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
        guard.get_or_insert_with(builder::production).clone()
    }

    /// Whether a logger (explicit or fallback) is installed.
    pub fn is_initialized(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Flush the installed logger, if any. Failures are ignored.
    pub fn flush(&self) {
        let logger = self.slot.read().clone();
        if let Some(logger) = logger {
            let _ = logger.flush();
        }
    }
}

static GLOBAL: Lazy<LoggerHandle> = Lazy::new(LoggerHandle::new);

/// The process-wide handle.
pub fn handle() -> &'static LoggerHandle {
    &GLOBAL
}

/// Initialize the process logger.
///
/// `level` is one of `debug`, `info`, `warn`, `error`; anything else means
/// `info`. An empty `log_file` logs to the console only.
pub fn init(level: &str, log_file: &str) -> Result<()> {
    GLOBAL.initialize(level, log_file)
}

/// Initialize the process logger from configuration.
pub fn init_from_config(config: &LoggerConfig) -> Result<()> {
    GLOBAL.initialize_from_config(config)
}

/// Install a pre-built logger as the process logger.
pub fn install(logger: Logger) {
    GLOBAL.install(logger);
}

/// The process logger.
pub fn logger() -> Logger {
    GLOBAL.get_active()
}

/// Flush buffered output. Call once before exit.
pub fn sync() {
    GLOBAL.flush();
}

/// Log at Debug on the process logger.
#[track_caller]
pub fn debug(message: &str, fields: &[Field]) {
    GLOBAL.get_active().debug(message, fields);
}

/// Log at Info on the process logger.
#[track_caller]
pub fn info(message: &str, fields: &[Field]) {
    GLOBAL.get_active().info(message, fields);
}

/// Log at Warn on the process logger.
#[track_caller]
pub fn warn(message: &str, fields: &[Field]) {
    GLOBAL.get_active().warn(message, fields);
}

/// Log at Error on the process logger.
#[track_caller]
pub fn error(message: &str, fields: &[Field]) {
    GLOBAL.get_active().error(message, fields);
}

/// Log at Fatal on the process logger, flush, and exit the process.
#[track_caller]
pub fn fatal(message: &str, fields: &[Field]) -> ! {
    GLOBAL.get_active().fatal(message, fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::JsonEncoder;
    use crate::sink::tests::SharedBuffer;
    use crate::sink::WriterSink;
    use agentlog_types::Severity;
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn buffered(threshold: Severity) -> (Logger, SharedBuffer) {
        let buf = SharedBuffer::default();
        let logger = Logger::new(WriterSink::new(buf.clone(), JsonEncoder::new(), threshold));
        (logger, buf)
    }

    #[test]
    fn test_get_active_installs_fallback_once() {
        let handle = LoggerHandle::new();
        assert!(!handle.is_initialized());

        let first = handle.get_active();
        let second = handle.get_active();
        assert!(handle.is_initialized());
        assert!(first.same_sink(&second));
        assert!(first.enabled(Severity::Info));
    }

    #[test]
    fn test_concurrent_first_use_yields_one_fallback() {
        let handle = Arc::new(LoggerHandle::new());
        let barrier = Arc::new(Barrier::new(16));

        let loggers: Vec<Logger> = (0..16)
            .map(|_| {
                let handle = Arc::clone(&handle);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    handle.get_active()
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|t| t.join().unwrap())
            .collect();

        let active = handle.get_active();
        assert!(loggers.iter().all(|l| l.same_sink(&active)));
    }

    #[test]
    fn test_initialize_replaces_fallback() {
        let handle = LoggerHandle::new();
        let fallback = handle.get_active();

        let (logger, buf) = buffered(Severity::Warn);
        handle.install(logger);

        let active = handle.get_active();
        assert!(!active.same_sink(&fallback));
        active.info("dropped", &[]);
        active.warn("kept", &[]);
        assert_eq!(buf.lines().len(), 1);
    }

    #[test]
    fn test_failed_initialize_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("missing").join("agent.log");

        let handle = LoggerHandle::new();
        assert!(handle.initialize("info", bad.to_str().unwrap()).is_err());
        assert!(!handle.is_initialized());

        let (logger, _buf) = buffered(Severity::Debug);
        handle.install(logger.clone());
        assert!(handle.initialize("info", bad.to_str().unwrap()).is_err());
        assert!(handle.get_active().same_sink(&logger));
    }

    #[test]
    fn test_initialize_writes_file_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");

        let handle = LoggerHandle::new();
        handle.initialize("warn", path.to_str().unwrap()).unwrap();

        let logger = handle.get_active();
        logger.debug("x", &[]);
        logger.info("y", &[]);
        logger.warn("z", &[Field::string("k", "v")]);
        logger.error("boom", &[]);
        handle.flush();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#""level":"WARN""#));
        assert!(lines[0].contains(r#""k":"v""#));
        assert!(lines[1].contains(r#""level":"ERROR""#));

        let error: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert!(!error["stacktrace"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_flush_on_empty_handle_is_noop() {
        let handle = LoggerHandle::new();
        handle.flush();
        assert!(!handle.is_initialized());
    }
}
