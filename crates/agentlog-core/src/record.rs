//! The logical record handed to every sink.

use agentlog_types::{Field, Severity};
use chrono::{DateTime, Local};
use std::fmt;
use std::panic::Location;
use std::path::{Component, Path};

/// Source location of the code that emitted a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Source file as reported by the compiler
    pub file: String,
    /// 1-based line number
    pub line: u32,
}

impl Caller {
    /// Caller from a `#[track_caller]` location.
    pub fn from_location(location: &Location<'_>) -> Self {
        Self {
            file: location.file().to_string(),
            line: location.line(),
        }
    }

    /// Short form: the last two path components and the line, e.g. `src/main.rs:42`.
    pub fn short(&self) -> String {
        let parts: Vec<&str> = Path::new(&self.file)
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .collect();
        let start = parts.len().saturating_sub(2);
        format!("{}:{}", parts[start..].join("/"), self.line)
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short())
    }
}

/// One log record.
#[derive(Debug, Clone)]
pub struct Record {
    /// Wall-clock time the record was created
    pub time: DateTime<Local>,
    /// Record severity
    pub severity: Severity,
    /// Dotted logger name, if the logger was named
    pub logger: Option<String>,
    /// Emitting call site, if caller annotation is enabled
    pub caller: Option<Caller>,
    /// Message text
    pub message: String,
    /// Context fields followed by call fields
    pub fields: Vec<Field>,
    /// Rendered stack trace for severe records
    pub stacktrace: Option<String>,
}

impl Record {
    /// Record stamped with the current time and no optional parts.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            time: Local::now(),
            severity,
            logger: None,
            caller: None,
            message: message.into(),
            fields: Vec::new(),
            stacktrace: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_caller() {
        let caller = Caller {
            file: "crates/agentlog-core/src/global.rs".to_string(),
            line: 12,
        };
        assert_eq!(caller.short(), "src/global.rs:12");

        let bare = Caller {
            file: "main.rs".to_string(),
            line: 3,
        };
        assert_eq!(bare.short(), "main.rs:3");
    }

    #[test]
    fn test_from_location_tracks_this_file() {
        let caller = Caller::from_location(Location::caller());
        assert!(caller.file.ends_with("record.rs"));
        assert!(caller.line > 0);
    }
}
