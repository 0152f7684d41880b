//! Output sinks and fan-out.
//!
//! A sink is a destination plus an encoding plus a threshold. Records below
//! the threshold are dropped before they are encoded.

use crate::encoder::{ConsoleEncoder, Encoder, JsonEncoder};
use crate::record::Record;
use agentlog_types::{LoggerError, Result, Severity};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Stdout, Write};
use std::path::Path;

/// Destination for encoded records.
pub trait Sink: Send + Sync {
    /// Whether a record at `severity` would be written.
    fn enabled(&self, severity: Severity) -> bool;

    /// Write one record. Callers check [`Sink::enabled`] first.
    fn write(&self, record: &Record) -> io::Result<()>;

    /// Push buffered bytes to the underlying destination.
    fn flush(&self) -> io::Result<()>;
}

/// A sink over any [`Write`] target.
///
/// Each record is encoded into a scratch buffer and written with a single
/// `write_all` while the writer lock is held, so entries never interleave.
pub struct WriterSink<W> {
    writer: Mutex<W>,
    encoder: Box<dyn Encoder>,
    threshold: Severity,
}

impl<W: Write + Send> WriterSink<W> {
    /// Sink writing `encoder` output to `writer` for records at or above `threshold`.
    pub fn new(writer: W, encoder: impl Encoder + 'static, threshold: Severity) -> Self {
        Self {
            writer: Mutex::new(writer),
            encoder: Box::new(encoder),
            threshold,
        }
    }

    /// Configured threshold.
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn enabled(&self, severity: Severity) -> bool {
        severity >= self.threshold
    }

    fn write(&self, record: &Record) -> io::Result<()> {
        if !self.enabled(record.severity) {
            return Ok(());
        }

        let mut buf = Vec::with_capacity(256);
        self.encoder.encode(record, &mut buf)?;

        let mut writer = self.writer.lock();
        writer.write_all(&buf)?;
        // The process may be about to exit
        if record.severity > Severity::Error {
            writer.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        self.writer.lock().flush()
    }
}

/// Colourised human-readable lines on standard output.
pub type ConsoleSink = WriterSink<Stdout>;

/// JSON lines appended to a file.
pub type FileSink = WriterSink<LineWriter<File>>;

/// Console sink at `threshold`.
pub fn console(threshold: Severity) -> ConsoleSink {
    WriterSink::new(io::stdout(), ConsoleEncoder::colored(), threshold)
}

/// Open `path` for append (created with mode 0644 if missing, never truncated)
/// and build a JSON file sink at `threshold`.
pub fn file(path: impl AsRef<Path>, threshold: Severity) -> Result<FileSink> {
    let path = path.as_ref();
    let handle = open_append(path).map_err(|source| LoggerError::OpenLogFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(WriterSink::new(
        LineWriter::new(handle),
        JsonEncoder::new(),
        threshold,
    ))
}

fn open_append(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.append(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path)
}

/// Writes every accepted record to all constituent sinks.
#[derive(Default)]
pub struct Tee {
    sinks: Vec<Box<dyn Sink>>,
}

impl Tee {
    /// Fan-out over `sinks`.
    pub fn new(sinks: Vec<Box<dyn Sink>>) -> Self {
        Self { sinks }
    }

    /// Add a sink.
    pub fn push(&mut self, sink: impl Sink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Number of constituent sinks.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether there are no sinks.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl Sink for Tee {
    fn enabled(&self, severity: Severity) -> bool {
        self.sinks.iter().any(|s| s.enabled(severity))
    }

    /// A failing sink does not stop the others; the first error is returned.
    fn write(&self, record: &Record) -> io::Result<()> {
        let mut first_err = None;
        for sink in self.sinks.iter().filter(|s| s.enabled(record.severity)) {
            if let Err(e) = sink.write(record) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn flush(&self) -> io::Result<()> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = sink.flush() {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
