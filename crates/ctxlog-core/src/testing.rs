//! Record capture for tests.
//!
//! [`TestLogger`] owns a [`MemorySink`] and hands out entries writing to it,
//! so tests can assert on what was logged without installing a global
//! `log` backend.
//!
//! ```
//! use ctxlog_core::Logger;
//! use ctxlog_core::testing::TestLogger;
//!
//! let test = TestLogger::new();
//! test.entry().with_field("user", "alice").info("signed in");
//!
//! test.assert_contains("signed in");
//! assert_eq!(test.last().unwrap().fields["user"], "alice");
//! ```

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::{Entry, Fields, Level, Sink};

/// One captured record.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRecord {
    /// Level the record was emitted at.
    pub level: Level,
    /// Formatted message.
    pub message: String,
    /// Fields carried by the emitting entry.
    pub fields: Fields,
}

/// Sink that keeps every record in memory.
#[derive(Debug)]
pub struct MemorySink {
    min_level: Level,
    records: Mutex<Vec<CapturedRecord>>,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new(Level::Trace)
    }
}

impl MemorySink {
    /// Creates a sink keeping records at `min_level` and above.
    #[must_use]
    pub fn new(min_level: Level) -> Self {
        Self {
            min_level,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of the captured records.
    #[must_use]
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Drops all captured records.
    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

impl Sink for MemorySink {
    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    fn emit(&self, level: Level, fields: &Fields, args: fmt::Arguments<'_>) {
        if let Ok(mut records) = self.records.lock() {
            records.push(CapturedRecord {
                level,
                message: args.to_string(),
                fields: fields.clone(),
            });
        }
    }
}

/// Capturing logger for tests.
#[derive(Debug, Clone)]
pub struct TestLogger {
    sink: Arc<MemorySink>,
    entry: Entry,
}

impl Default for TestLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLogger {
    /// Creates a test logger capturing every level.
    #[must_use]
    pub fn new() -> Self {
        Self::with_min_level(Level::Trace)
    }

    /// Creates a test logger capturing `min_level` and above.
    #[must_use]
    pub fn with_min_level(min_level: Level) -> Self {
        let sink = Arc::new(MemorySink::new(min_level));
        let entry = Entry::new(sink.clone());
        Self { sink, entry }
    }

    /// Returns the base entry (no fields) writing to this logger.
    ///
    /// Every call returns a clone of the same entry.
    #[must_use]
    pub fn entry(&self) -> Entry {
        self.entry.clone()
    }

    /// Returns the underlying sink.
    #[must_use]
    pub fn sink(&self) -> &Arc<MemorySink> {
        &self.sink
    }

    /// Returns all captured records.
    #[must_use]
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.sink.records()
    }

    /// Returns the captured messages in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }

    /// Returns the most recent record.
    #[must_use]
    pub fn last(&self) -> Option<CapturedRecord> {
        self.records().pop()
    }

    /// Returns true if any message contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.records().iter().any(|r| r.message.contains(needle))
    }

    /// Asserts that some message contains `needle`.
    ///
    /// # Panics
    ///
    /// Panics with the captured messages when none matches.
    pub fn assert_contains(&self, needle: &str) {
        assert!(
            self.contains(needle),
            "expected a record containing {needle:?}, got {:?}",
            self.messages()
        );
    }

    /// Drops all captured records.
    pub fn clear(&self) {
        self.sink.clear();
    }
}
