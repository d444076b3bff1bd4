//! Building enriched loggers from a context.
//!
//! Each call resolves the base entry (bound or default), then layers on
//! fields in this order, later layers winning on a name collision:
//!
//! 1. the base entry's own fields
//! 2. one field per requested context key that has a value in the context
//! 3. the explicit fields passed by the caller
//!
//! Absent keys and values that fail to serialize contribute nothing. So do
//! keys bound with [`Context::with_opaque`]: the key is present in the
//! context, but its value is skipped rather than logged. The context and the
//! default slot are never touched.

use std::fmt;

use serde::Serialize;

use crate::fields::{collect_context_fields, collect_explicit_fields};
use crate::{Context, DefaultLogger, Entry, FieldKey, Fields};

impl DefaultLogger {
    /// Returns the resolved entry enriched with the values of `keys` found
    /// in `ctx`.
    #[must_use]
    pub fn logger(&self, ctx: &Context, keys: &[&dyn FieldKey]) -> Entry {
        self.enrich(ctx, keys, Fields::new())
    }

    /// Like [`logger`](Self::logger), plus the field `key = value`.
    #[must_use]
    pub fn logger_with_field<K, V>(
        &self,
        ctx: &Context,
        key: K,
        value: V,
        keys: &[&dyn FieldKey],
    ) -> Entry
    where
        K: fmt::Display,
        V: Serialize,
    {
        self.logger_with_fields(ctx, [(key, value)], keys)
    }

    /// Like [`logger`](Self::logger), plus every pair in `fields`.
    ///
    /// Keys are stringified with `Display`. Distinct keys with the same text
    /// overwrite each other in iteration order.
    #[must_use]
    pub fn logger_with_fields<I, K, V>(
        &self,
        ctx: &Context,
        fields: I,
        keys: &[&dyn FieldKey],
    ) -> Entry
    where
        I: IntoIterator<Item = (K, V)>,
        K: fmt::Display,
        V: Serialize,
    {
        let mut explicit = Fields::new();
        collect_explicit_fields(fields, &mut explicit);
        self.enrich(ctx, keys, explicit)
    }

    fn enrich(&self, ctx: &Context, keys: &[&dyn FieldKey], explicit: Fields) -> Entry {
        let base = self.resolve(ctx);
        let mut fields = Fields::new();
        collect_context_fields(ctx, keys, &mut fields);
        fields.extend(explicit);
        base.with_fields(fields)
    }
}

/// Returns the context's logger enriched with the values of `keys` found in
/// `ctx`.
///
/// ```
/// use ctxlog_core::{Context, Logger};
///
/// let ctx = Context::background().with_value("request_id", "abc");
/// let log = ctxlog_core::logger(&ctx, &[&"request_id", &"user"]);
///
/// assert_eq!(log.fields()["request_id"], "abc");
/// assert!(!log.fields().contains_key("user"));
/// log.info("handled");
/// ```
#[must_use]
pub fn logger(ctx: &Context, keys: &[&dyn FieldKey]) -> Entry {
    DefaultLogger::global().logger(ctx, keys)
}

/// Returns the context's logger with `key = value` added, plus the values of
/// `keys` found in `ctx`.
#[must_use]
pub fn logger_with_field<K, V>(ctx: &Context, key: K, value: V, keys: &[&dyn FieldKey]) -> Entry
where
    K: fmt::Display,
    V: Serialize,
{
    DefaultLogger::global().logger_with_field(ctx, key, value, keys)
}

/// Returns the context's logger with every pair of `fields` added, plus the
/// values of `keys` found in `ctx`.
#[must_use]
pub fn logger_with_fields<I, K, V>(ctx: &Context, fields: I, keys: &[&dyn FieldKey]) -> Entry
where
    I: IntoIterator<Item = (K, V)>,
    K: fmt::Display,
    V: Serialize,
{
    DefaultLogger::global().logger_with_fields(ctx, fields, keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestLogger;
    use crate::{Logger, bind};
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    enum Key {
        RequestId,
        Tenant,
    }

    impl fmt::Display for Key {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                Key::RequestId => "request_id",
                Key::Tenant => "tenant",
            })
        }
    }

    fn setup() -> (TestLogger, DefaultLogger) {
        let test = TestLogger::new();
        let holder = DefaultLogger::new(test.entry());
        (test, holder)
    }

    #[test]
    fn test_logger_with_field() {
        let (test, holder) = setup();
        let ctx = Context::background();

        let log = holder.logger_with_field(&ctx, "k", "v", &[]);
        assert_eq!(log.fields().len(), 1);
        assert_eq!(log.fields()["k"], json!("v"));

        // The resolvable logger is untouched.
        assert!(holder.resolve(&ctx).fields().is_empty());
        assert!(holder.resolve(&ctx).same_as(&test.entry()));
    }

    #[test]
    fn test_logger_with_fields_and_present_context_key() {
        let (_test, holder) = setup();
        let ctx = Context::background().with_value("reqID", "xyz");

        let log = holder.logger_with_fields(&ctx, [("a", 1), ("b", 2)], &[&"reqID"]);
        assert_eq!(
            serde_json::to_value(log.fields()).unwrap(),
            json!({"a": 1, "b": 2, "reqID": "xyz"})
        );
    }

    #[test]
    fn test_logger_with_fields_and_absent_context_key() {
        let (_test, holder) = setup();
        let ctx = Context::background();

        let log = holder.logger_with_fields(&ctx, [("a", 1), ("b", 2)], &[&"reqID"]);
        assert_eq!(
            serde_json::to_value(log.fields()).unwrap(),
            json!({"a": 1, "b": 2})
        );
    }

    #[test]
    fn test_logger_resolves_only_context_keys() {
        let (test, holder) = setup();
        let ctx = Context::background()
            .with_value(Key::RequestId, "r-9")
            .with_value(Key::Tenant, "acme")
            .with_value("unrequested", true);

        let log = holder.logger(&ctx, &[&Key::RequestId, &Key::Tenant]);
        log.info("handled");

        let record = test.last().unwrap();
        assert_eq!(record.fields.len(), 2);
        assert_eq!(record.fields["request_id"], json!("r-9"));
        assert_eq!(record.fields["tenant"], json!("acme"));
    }

    #[test]
    fn test_explicit_fields_win_over_context_fields() {
        let (_test, holder) = setup();
        let ctx = Context::background().with_value("user", "from-context");

        let log = holder.logger_with_field(&ctx, "user", "explicit", &[&"user"]);
        assert_eq!(log.fields()["user"], json!("explicit"));
    }

    #[test]
    fn test_context_fields_win_over_base_fields() {
        let test = TestLogger::new();
        let holder = DefaultLogger::new(test.entry().with_field("user", "base"));
        let ctx = Context::background().with_value("user", "ctx");

        assert_eq!(holder.logger(&ctx, &[&"user"]).fields()["user"], json!("ctx"));
        assert_eq!(holder.logger(&ctx, &[]).fields()["user"], json!("base"));
    }

    #[test]
    fn test_bound_logger_is_the_base() {
        let (default_test, holder) = setup();
        let bound_test = TestLogger::new();
        let ctx = bind(
            &Context::background().with_value("request_id", "r-1"),
            bound_test.entry().with_field("service", "api"),
        );

        holder.logger(&ctx, &[&"request_id"]).warn("slow");

        assert!(default_test.records().is_empty());
        let record = bound_test.last().unwrap();
        assert_eq!(record.fields["service"], json!("api"));
        assert_eq!(record.fields["request_id"], json!("r-1"));
    }

    #[test]
    fn test_non_string_keys_are_stringified() {
        let (_test, holder) = setup();
        let ctx = Context::background().with_value(7u8, "seven");

        let log = holder.logger_with_fields(&ctx, [(1, "one"), (2, "two")], &[&7u8]);
        assert_eq!(log.fields()["1"], json!("one"));
        assert_eq!(log.fields()["2"], json!("two"));
        assert_eq!(log.fields()["7"], json!("seven"));
    }

    #[test]
    fn test_each_call_returns_a_fresh_entry() {
        let (_test, holder) = setup();
        let ctx = Context::background();

        let first = holder.logger_with_field(&ctx, "n", 1, &[]);
        let second = holder.logger_with_field(&ctx, "n", 2, &[]);
        assert_eq!(first.fields()["n"], json!(1));
        assert_eq!(second.fields()["n"], json!(2));
        assert!(!first.same_as(&second));
    }

    #[test]
    fn test_resolution_does_not_touch_default_slot() {
        let (test, holder) = setup();
        let ctx = Context::background().with_value("k", "v");

        let _ = holder.logger_with_fields(&ctx, [("a", 1)], &[&"k"]);
        assert!(holder.get().same_as(&test.entry()));
        assert!(holder.get().fields().is_empty());
        assert_eq!(holder.rejected_replacements(), 0);
    }
}
