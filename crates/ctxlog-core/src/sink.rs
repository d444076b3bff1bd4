//! Backend seam for emitted records.
//!
//! A [`Sink`] receives every record an [`Entry`](crate::Entry) emits. ctxlog
//! does not format or transport records itself; [`LogSink`] hands them to the
//! `log` facade so whatever backend the application installed (env_logger,
//! a tracing bridge, ...) decides filtering and output.

use std::fmt;

use log::kv::{self, Key, Source, Value, VisitSource};

use crate::{Fields, Level};
use crate::level::targets;

/// Destination for log records.
pub trait Sink: Send + Sync {
    /// Returns whether a record at `level` would be kept.
    ///
    /// Used to skip formatting work; sinks that always accept may keep the
    /// default.
    fn enabled(&self, level: Level) -> bool {
        let _ = level;
        true
    }

    /// Emits one record.
    fn emit(&self, level: Level, fields: &Fields, args: fmt::Arguments<'_>);
}

/// Sink forwarding records to the `log` facade.
///
/// Fields travel as `log` key/values, so backends with key/value support
/// print them alongside the message. String fields are passed unquoted,
/// everything else as compact JSON.
#[derive(Debug, Clone)]
pub struct LogSink {
    target: String,
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(targets::CTXLOG)
    }
}

impl LogSink {
    /// Creates a sink that logs under `target`.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// Returns the log target.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Sink for LogSink {
    fn enabled(&self, level: Level) -> bool {
        let level = log::Level::from(level);
        level <= log::max_level()
            && log::logger().enabled(
                &log::Metadata::builder()
                    .level(level)
                    .target(&self.target)
                    .build(),
            )
    }

    fn emit(&self, level: Level, fields: &Fields, args: fmt::Arguments<'_>) {
        let source = FieldSource(fields);
        log::logger().log(
            &log::Record::builder()
                .args(args)
                .level(level.into())
                .target(&self.target)
                .key_values(&source)
                .build(),
        );
    }
}

/// Exposes [`Fields`] as `log` key/values.
struct FieldSource<'a>(&'a Fields);

impl Source for FieldSource<'_> {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), kv::Error> {
        for (key, value) in self.0 {
            let value = match value {
                serde_json::Value::String(text) => Value::from(text.as_str()),
                other => Value::from_display(other),
            };
            visitor.visit_pair(Key::from_str(key), value)?;
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Collect(Vec<(String, String)>);

    impl<'kvs> VisitSource<'kvs> for Collect {
        fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
            self.0.push((key.to_string(), value.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_default_target() {
        assert_eq!(LogSink::default().target(), "ctxlog");
        assert_eq!(LogSink::new("api").target(), "api");
    }

    #[test]
    fn test_fields_become_key_values() {
        let mut fields = Fields::new();
        fields.insert("request_id".to_string(), json!("xyz"));
        fields.insert("attempt".to_string(), json!(2));

        let source = FieldSource(&fields);
        let mut collect = Collect(Vec::new());
        source.visit(&mut collect).unwrap();

        assert_eq!(source.count(), 2);
        assert_eq!(
            collect.0,
            vec![
                ("attempt".to_string(), "2".to_string()),
                ("request_id".to_string(), "xyz".to_string()),
            ]
        );
    }

    #[test]
    fn test_emit_is_harmless() {
        // Whatever backend the test binary has installed, emitting never panics.
        let sink = LogSink::default();
        sink.emit(Level::Info, &Fields::new(), format_args!("dropped"));
    }
}
