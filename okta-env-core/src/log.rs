//! Buffered logging for code that runs before the log subscriber exists.

use std::sync::{Mutex, PoisonError};

use tracing::Level;

/// One buffered log message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    /// Component that produced the message.
    pub origin: String,
    pub message: String,
}

/// Destination for replayed log records.
pub trait LogSink {
    fn log(&self, record: &LogRecord);
}

/// Replays records through the global `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, record: &LogRecord) {
        let origin = record.origin.as_str();
        let message = record.message.as_str();
        match record.level {
            Level::ERROR => tracing::error!(origin, "{message}"),
            Level::WARN => tracing::warn!(origin, "{message}"),
            Level::INFO => tracing::info!(origin, "{message}"),
            Level::DEBUG => tracing::debug!(origin, "{message}"),
            _ => tracing::trace!(origin, "{message}"),
        }
    }
}

/// Log buffer for the bootstrap phase.
///
/// Messages are held in memory until [`DeferredLog::flush`] hands them to a
/// real sink. `flush` consumes the buffer, so each message is replayed at most
/// once.
#[derive(Debug, Default)]
pub struct DeferredLog {
    records: Mutex<Vec<LogRecord>>,
}

impl DeferredLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&self, origin: &str, message: impl Into<String>) {
        self.push(Level::WARN, origin, message.into());
    }

    pub fn info(&self, origin: &str, message: impl Into<String>) {
        self.push(Level::INFO, origin, message.into());
    }

    pub fn debug(&self, origin: &str, message: impl Into<String>) {
        self.push(Level::DEBUG, origin, message.into());
    }

    fn push(&self, level: Level, origin: &str, message: String) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogRecord {
                level,
                origin: origin.to_string(),
                message,
            });
    }

    /// A copy of the buffered records, oldest first.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Replay every buffered record into `sink`, oldest first. Returns the
    /// number of records replayed.
    pub fn flush(self, sink: &dyn LogSink) -> usize {
        let records = self
            .records
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        for record in &records {
            sink.log(record);
        }
        records.len()
    }
}
