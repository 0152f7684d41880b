//! Logger construction presets.

use crate::encoder::JsonEncoder;
use crate::logger::Logger;
use crate::sink::{self, Tee, WriterSink};
use agentlog_types::{LoggerConfig, Result, Severity};
use std::io;

/// Build the process logger from level text and an optional file path.
///
/// The level is parsed leniently. Console and file sinks share the threshold.
/// An empty `file_path` means console only and no file is created. Callers
/// are annotated, and stack traces are attached from `Error` upward.
pub fn build(level_text: &str, file_path: &str) -> Result<Logger> {
    let threshold = Severity::parse_or_default(level_text);

    let mut tee = Tee::default();
    tee.push(sink::console(threshold));
    if !file_path.is_empty() {
        tee.push(sink::file(file_path, threshold)?);
    }

    Ok(Logger::new(tee)
        .with_caller(true)
        .with_stacktrace(Some(Severity::Error)))
}

/// Build the process logger from configuration.
pub fn from_config(config: &LoggerConfig) -> Result<Logger> {
    build(&config.level, &config.file)
}

/// Fallback preset used when nothing was configured.
///
/// JSON records on standard error at `Info`, callers annotated, stack traces
/// from `Error` upward. Never fails.
pub fn production() -> Logger {
    Logger::new(WriterSink::new(io::stderr(), JsonEncoder::new(), Severity::Info))
        .with_caller(true)
        .with_stacktrace(Some(Severity::Error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentlog_types::LoggerError;

    #[test]
    fn test_threshold_follows_level_text() {
        let cases = [
            ("debug", Severity::Debug),
            ("info", Severity::Info),
            ("warn", Severity::Warn),
            ("error", Severity::Error),
            ("verbose", Severity::Info),
            ("", Severity::Info),
        ];
        for (text, expected) in cases {
            let logger = build(text, "").unwrap();
            assert!(logger.enabled(expected), "{text}");
            if expected > Severity::Debug {
                let below = match expected {
                    Severity::Info => Severity::Debug,
                    Severity::Warn => Severity::Info,
                    _ => Severity::Warn,
                };
                assert!(!logger.enabled(below), "{text}");
            }
        }
    }

    #[test]
    fn test_empty_path_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let before = std::fs::read_dir(dir.path()).unwrap().count();
        let _logger = build("info", "").unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), before);
    }

    #[test]
    fn test_file_records_are_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.log");
        let logger = build("debug", path.to_str().unwrap()).unwrap();

        for i in 0..5 {
            logger.info("tick", &[agentlog_types::Field::int("i", i)]);
        }
        logger.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("time").is_some());
            assert_eq!(value["level"], "INFO");
            assert_eq!(value["msg"], "tick");
        }
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("agent.log");
        let err = build("info", path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, LoggerError::OpenLogFile { .. }));
    }

    #[test]
    fn test_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.log");
        let config = LoggerConfig::new("error", path.to_str().unwrap());
        let logger = from_config(&config).unwrap();
        assert!(!logger.enabled(Severity::Warn));
        assert!(path.exists());
    }

    #[test]
    fn test_production_preset() {
        let logger = production();
        assert!(logger.enabled(Severity::Info));
        assert!(!logger.enabled(Severity::Debug));
    }
}
