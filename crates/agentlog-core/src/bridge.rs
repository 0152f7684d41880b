//! Bridge from the `tracing` ecosystem into agentlog sinks.
//!
//! [`FacadeLayer`] is a `tracing-subscriber` layer that turns every `tracing`
//! event into an agentlog record, so dependencies instrumented with
//! `tracing::info!` and friends end up in the same console and file sinks as
//! direct calls.
//!
//! # Usage
//!
//! ```rust,no_run
//! agentlog_core::init("info", "logs/app.log")?;
//! agentlog_core::bridge::install_tracing_bridge()?;
//!
//! tracing::info!(grpc_port = 9090, "Agent Server started successfully");
//! # Ok::<(), agentlog_types::LoggerError>(())
//! ```

use crate::global::{self, LoggerHandle};
use crate::logger::Logger;
use crate::record::Caller;
use agentlog_types::{Field, FieldValue, LoggerError, Result, Severity};
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field as TracingField, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// Map a `tracing` level onto a record severity. TRACE folds into Debug.
pub fn severity_from_level(level: &Level) -> Severity {
    match *level {
        Level::TRACE | Level::DEBUG => Severity::Debug,
        Level::INFO => Severity::Info,
        Level::WARN => Severity::Warn,
        _ => Severity::Error,
    }
}

/// Map a record severity onto the closest `tracing` level.
pub fn level_from_severity(severity: Severity) -> Level {
    match severity {
        Severity::Debug => Level::DEBUG,
        Severity::Info => Level::INFO,
        Severity::Warn => Level::WARN,
        Severity::Error | Severity::Fatal => Level::ERROR,
    }
}

/// A tracing layer that forwards events to an agentlog logger.
pub struct FacadeLayer {
    handle: Option<Arc<LoggerHandle>>,
}

impl FacadeLayer {
    /// Layer writing to the process-wide logger.
    pub fn global() -> Self {
        Self { handle: None }
    }

    /// Layer writing to the logger installed in `handle`.
    pub fn for_handle(handle: Arc<LoggerHandle>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    fn logger(&self) -> Logger {
        match &self.handle {
            Some(handle) => handle.get_active(),
            None => global::logger(),
        }
    }
}

impl<S: Subscriber> Layer<S> for FacadeLayer {
    // The active logger can be replaced at any time, so no callsite decision is cached
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.logger().enabled(severity_from_level(metadata.level()))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let severity = severity_from_level(metadata.level());
        let logger = self.logger();
        if !logger.enabled(severity) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let caller = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => Some(Caller {
                file: file.to_string(),
                line,
            }),
            _ => None,
        };

        logger
            .named(metadata.target())
            .emit(severity, &visitor.message, visitor.fields, caller);
    }
}

/// Collects the message and typed fields of one event.
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<Field>,
}

impl FieldVisitor {
    fn push(&mut self, field: &TracingField, value: FieldValue) {
        self.fields.push(Field::new(field.name(), value));
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &TracingField, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push(field, FieldValue::Str(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.push(field, FieldValue::Int(value));
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.push(field, FieldValue::Uint(value));
    }

    fn record_f64(&mut self, field: &TracingField, value: f64) {
        self.push(field, FieldValue::Float(value));
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.push(field, FieldValue::Bool(value));
    }

    fn record_error(&mut self, field: &TracingField, value: &(dyn std::error::Error + 'static)) {
        self.push(field, FieldValue::Error(value.to_string()));
    }

    fn record_debug(&mut self, field: &TracingField, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push(field, FieldValue::Str(format!("{:?}", value)));
        }
    }
}

/// Install a registry with [`FacadeLayer`] as the global `tracing` subscriber.
pub fn install_tracing_bridge() -> Result<()> {
    tracing_subscriber::registry()
        .with(FacadeLayer::global())
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))
}
