//! The logger handle.
//!
//! A [`Logger`] is cheap to clone: everything lives behind one `Arc`. Child
//! loggers created with [`Logger::named`] and [`Logger::with`] share the parent's
//! sink.

use crate::record::{Caller, Record};
use crate::sink::Sink;
use agentlog_types::{Field, Result, Severity};
use chrono::Local;
use std::backtrace::Backtrace;
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;
use std::sync::Arc;

/// Exit status used by [`Logger::fatal`].
pub const FATAL_EXIT_CODE: i32 = 1;

#[derive(Clone)]
struct Inner {
    sink: Arc<dyn Sink>,
    name: Option<String>,
    context: Vec<Field>,
    add_caller: bool,
    stacktrace_level: Option<Severity>,
}

/// Structured logger writing to one sink (usually a [`crate::sink::Tee`]).
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    /// Logger over `sink` with no caller annotation and no stack traces.
    pub fn new(sink: impl Sink + 'static) -> Self {
        Self::from_shared(Arc::new(sink))
    }

    /// Logger over an already shared sink.
    pub fn from_shared(sink: Arc<dyn Sink>) -> Self {
        Self {
            inner: Arc::new(Inner {
                sink,
                name: None,
                context: Vec::new(),
                add_caller: false,
                stacktrace_level: None,
            }),
        }
    }

    /// Attach the emitting call site to every record.
    pub fn with_caller(mut self, enabled: bool) -> Self {
        Arc::make_mut(&mut self.inner).add_caller = enabled;
        self
    }

    /// Attach a stack trace to records at or above `level`; `None` disables.
    pub fn with_stacktrace(mut self, level: Option<Severity>) -> Self {
        Arc::make_mut(&mut self.inner).stacktrace_level = level;
        self
    }

    /// Child logger whose name is this logger's name plus `.name`.
    pub fn named(&self, name: &str) -> Self {
        let mut inner = (*self.inner).clone();
        inner.name = Some(match &self.inner.name {
            Some(parent) if !name.is_empty() => format!("{}.{}", parent, name),
            Some(parent) => parent.clone(),
            None => name.to_string(),
        });
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Child logger that adds `fields` ahead of every record's own fields.
    pub fn with(&self, fields: &[Field]) -> Self {
        let mut inner = (*self.inner).clone();
        inner.context.extend_from_slice(fields);
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Dotted name, if any.
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Whether a record at `severity` would reach any sink.
    pub fn enabled(&self, severity: Severity) -> bool {
        self.inner.sink.enabled(severity)
    }

    /// Whether two handles share the same sink.
    pub fn same_sink(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.inner.sink, &other.inner.sink)
    }

    /// Emit a record at `severity` from the calling location.
    #[track_caller]
    pub fn log(&self, severity: Severity, message: &str, fields: &[Field]) {
        if !self.enabled(severity) {
            return;
        }
        let caller = Caller::from_location(Location::caller());
        self.write_record(severity, message, fields.to_vec(), Some(caller));
    }

    /// Emit a record with an explicit caller.
    ///
    /// The caller is dropped unless caller annotation is enabled.
    pub fn emit(&self, severity: Severity, message: &str, fields: Vec<Field>, caller: Option<Caller>) {
        if !self.enabled(severity) {
            return;
        }
        self.write_record(severity, message, fields, caller);
    }

    fn write_record(&self, severity: Severity, message: &str, fields: Vec<Field>, caller: Option<Caller>) {
        let inner = &self.inner;

        let mut all_fields = inner.context.clone();
        all_fields.extend(fields);

        let stacktrace = match inner.stacktrace_level {
            Some(level) if severity >= level => {
                Some(Backtrace::force_capture().to_string())
            }
            _ => None,
        };

        let record = Record {
            time: Local::now(),
            severity,
            logger: inner.name.clone(),
            caller: caller.filter(|_| inner.add_caller),
            message: message.to_string(),
            fields: all_fields,
            stacktrace,
        };

        if let Err(e) = inner.sink.write(&record) {
            report_write_error(&e);
        }
    }

    /// Log at Debug.
    #[track_caller]
    pub fn debug(&self, message: &str, fields: &[Field]) {
        self.log(Severity::Debug, message, fields);
    }

    /// Log at Info.
    #[track_caller]
    pub fn info(&self, message: &str, fields: &[Field]) {
        self.log(Severity::Info, message, fields);
    }

    /// Log at Warn.
    #[track_caller]
    pub fn warn(&self, message: &str, fields: &[Field]) {
        self.log(Severity::Warn, message, fields);
    }

    /// Log at Error.
    #[track_caller]
    pub fn error(&self, message: &str, fields: &[Field]) {
        self.log(Severity::Error, message, fields);
    }

    /// Log at Fatal, flush, and terminate the process with [`FATAL_EXIT_CODE`].
    ///
    /// Destructors of live values do not run.
    #[track_caller]
    pub fn fatal(&self, message: &str, fields: &[Field]) -> ! {
        self.log(Severity::Fatal, message, fields);
        let _ = self.flush();
        std::process::exit(FATAL_EXIT_CODE)
    }

    /// Flush every sink.
    pub fn flush(&self) -> Result<()> {
        self.inner.sink.flush()?;
        Ok(())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.inner.name)
            .field("context", &self.inner.context)
            .field("add_caller", &self.inner.add_caller)
            .field("stacktrace_level", &self.inner.stacktrace_level)
            .finish()
    }
}

// A sink failure cannot be logged through the sink that failed.
fn report_write_error(err: &io::Error) {
    let _ = writeln!(
        io::stderr(),
        "{} agentlog write error: {}",
        Local::now().format(crate::encoder::TIME_FORMAT),
        err
    );
}
