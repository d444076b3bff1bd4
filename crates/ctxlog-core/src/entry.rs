//! The concrete, field-carrying logger.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::fields::collect_explicit_fields;
use crate::{Fields, Level, LogSink, Logger, Sink};

/// Field name used by [`Logger::with_error`].
pub const ERROR_KEY: &str = "error";

/// A logger: a sink plus an immutable set of fields.
///
/// Cloning shares both the sink and the fields. Enrichment builds a new
/// field map and leaves `self` untouched:
///
/// ```
/// use ctxlog_core::Entry;
///
/// let base = Entry::default();
/// let enriched = base.with_field("tenant", "acme");
///
/// assert!(base.fields().is_empty());
/// assert_eq!(enriched.fields()["tenant"], "acme");
/// ```
#[derive(Clone)]
pub struct Entry {
    sink: Arc<dyn Sink>,
    fields: Arc<Fields>,
}

impl Default for Entry {
    /// An entry with no fields writing to the `log` facade.
    fn default() -> Self {
        Self::new(Arc::new(LogSink::default()))
    }
}

impl Entry {
    /// Creates an entry with no fields writing to `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self {
            sink,
            fields: Arc::new(Fields::new()),
        }
    }

    /// Returns the entry's fields.
    #[must_use]
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Returns the sink records are written to.
    #[must_use]
    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// Returns a new entry with one more field.
    ///
    /// The name is the key's `Display` text. A value that fails to serialize
    /// is dropped and the result carries the same fields as `self`.
    #[must_use]
    pub fn with_field(&self, key: impl fmt::Display, value: impl Serialize) -> Self {
        self.with_pairs([(key, value)])
    }

    /// Returns a new entry with `fields` merged over the existing ones.
    #[must_use]
    pub fn with_fields(&self, fields: Fields) -> Self {
        if fields.is_empty() {
            return self.derive(Arc::clone(&self.fields));
        }
        let mut merged = Fields::clone(&self.fields);
        merged.extend(fields);
        self.derive(Arc::new(merged))
    }

    /// Returns a new entry with key/value pairs merged over the existing
    /// fields, later pairs overwriting earlier ones.
    #[must_use]
    pub fn with_pairs<I, K, V>(&self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: fmt::Display,
        V: Serialize,
    {
        let mut added = Fields::new();
        collect_explicit_fields(pairs, &mut added);
        self.with_fields(added)
    }

    /// Returns true if both entries share the same sink and the same field
    /// allocation, i.e. one is a clone of the other.
    #[must_use]
    pub fn same_as(&self, other: &Entry) -> bool {
        Arc::ptr_eq(&self.sink, &other.sink) && Arc::ptr_eq(&self.fields, &other.fields)
    }

    fn derive(&self, fields: Arc<Fields>) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            fields,
        }
    }
}

impl Logger for Entry {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.sink.enabled(level) {
            self.sink.emit(level, &self.fields, args);
        }
    }

    fn with_error(&self, err: &dyn std::error::Error) -> Entry {
        self.with_field(ERROR_KEY, err.to_string())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
