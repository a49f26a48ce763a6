//! In-memory logger for assertions in tests and diagnostics.

use crate::log::{LogLevel, Logger};
use parking_lot::Mutex;
use std::fmt::Arguments;

/// A single captured log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Logger that keeps every record it receives.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records in arrival order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Number of records at `level` or above.
    pub fn count_at_least(&self, level: LogLevel) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level >= level)
            .count()
    }

    /// Whether any record at any level contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.records.lock().iter().any(|r| r.message.contains(needle))
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        self.records.lock().push(LogRecord {
            level,
            message: args.to_string(),
        });
    }
}
