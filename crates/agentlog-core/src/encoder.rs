//! Record encoders.
//!
//! An encoder turns a [`Record`] into the bytes of exactly one entry,
//! including the trailing newline. Sinks own the writer; encoders never do I/O
//! beyond the scratch buffer.

use crate::record::Record;
use agentlog_types::{Field, Severity};
use colored::Colorize;
use indexmap::IndexMap;
use serde_json::Value;
use std::io::{self, Write};

/// ISO-8601 with milliseconds and numeric offset.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Keys the JSON encoder writes itself.
const RESERVED_KEYS: [&str; 6] = ["level", "time", "logger", "caller", "msg", "stacktrace"];

/// Renders records into bytes.
pub trait Encoder: Send + Sync {
    /// Append one encoded entry to `buf`.
    fn encode(&self, record: &Record, buf: &mut Vec<u8>) -> io::Result<()>;
}

/// Human-readable, tab-separated lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleEncoder {
    color: bool,
}

impl ConsoleEncoder {
    /// Plain encoder; level names carry no escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Encoder that colour-highlights the level name.
    pub fn colored() -> Self {
        Self { color: true }
    }

    fn level(&self, severity: Severity) -> String {
        if !self.color {
            return severity.as_str().to_string();
        }
        let name = severity.as_str();
        match severity {
            Severity::Debug => name.magenta().to_string(),
            Severity::Info => name.blue().to_string(),
            Severity::Warn => name.yellow().to_string(),
            Severity::Error | Severity::Fatal => name.red().to_string(),
        }
    }
}

impl Encoder for ConsoleEncoder {
    fn encode(&self, record: &Record, buf: &mut Vec<u8>) -> io::Result<()> {
        write!(
            buf,
            "{}\t{}",
            record.time.format(TIME_FORMAT),
            self.level(record.severity)
        )?;
        if let Some(name) = &record.logger {
            write!(buf, "\t{}", name)?;
        }
        if let Some(caller) = &record.caller {
            write!(buf, "\t{}", caller.short())?;
        }
        write!(buf, "\t{}", record.message)?;

        if !record.fields.is_empty() {
            buf.push(b'\t');
            serde_json::to_writer(&mut *buf, &fields_object(&record.fields))?;
        }
        buf.push(b'\n');

        if let Some(stack) = &record.stacktrace {
            buf.extend_from_slice(stack.trim_end().as_bytes());
            buf.push(b'\n');
        }
        Ok(())
    }
}

/// One JSON object per line, machine-parseable.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl JsonEncoder {
    /// Create a JSON encoder.
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, record: &Record, buf: &mut Vec<u8>) -> io::Result<()> {
        let mut object: IndexMap<String, Value> = IndexMap::new();
        object.insert("level".into(), Value::from(record.severity.as_str()));
        object.insert(
            "time".into(),
            Value::from(record.time.format(TIME_FORMAT).to_string()),
        );
        if let Some(name) = &record.logger {
            object.insert("logger".into(), Value::from(name.as_str()));
        }
        if let Some(caller) = &record.caller {
            object.insert("caller".into(), Value::from(caller.short()));
        }
        object.insert("msg".into(), Value::from(record.message.as_str()));

        for field in &record.fields {
            // Fields never shadow the record's own keys
            let key = if RESERVED_KEYS.contains(&field.key.as_str()) {
                format!("fields.{}", field.key)
            } else {
                field.key.clone()
            };
            object.insert(key, field.value.to_json());
        }

        if let Some(stack) = &record.stacktrace {
            object.insert("stacktrace".into(), Value::from(stack.as_str()));
        }

        serde_json::to_writer(&mut *buf, &object)?;
        buf.push(b'\n');
        Ok(())
    }
}

fn fields_object(fields: &[Field]) -> IndexMap<&str, Value> {
    fields
        .iter()
        .map(|f| (f.key.as_str(), f.value.to_json()))
        .collect()
}
