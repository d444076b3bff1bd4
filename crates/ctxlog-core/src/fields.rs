//! Field sets and field keys.

use std::collections::BTreeMap;
use std::fmt;

use ctxlog_context::{Context, ContextKey};
use serde::Serialize;

/// Structured fields attached to a logger, keyed by field name.
pub type Fields = BTreeMap<String, serde_json::Value>;

/// A context key that can be surfaced as a log field.
///
/// The field name is the key's `Display` output, so every key type used with
/// the resolver produces its name through the same conversion. Integer-like
/// or enum keys should implement `Display` with a readable name.
///
/// Only values attached with [`Context::with_value`] become fields. A key
/// bound with [`Context::with_opaque`] is present in the context
/// ([`Context::contains`] returns true) but is skipped when fields are
/// collected, because its value has no rendering.
///
/// ```
/// use std::fmt;
///
/// #[derive(Debug, PartialEq)]
/// enum RequestKey {
///     Id,
///     Tenant,
/// }
///
/// impl fmt::Display for RequestKey {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str(match self {
///             RequestKey::Id => "request_id",
///             RequestKey::Tenant => "tenant",
///         })
///     }
/// }
///
/// let key: &dyn ctxlog_core::FieldKey = &RequestKey::Id;
/// assert_eq!(ctxlog_core::field_name(key), "request_id");
/// ```
pub trait FieldKey: ContextKey + fmt::Display {
    /// Returns the key for context lookup.
    fn as_context_key(&self) -> &dyn ContextKey;
}

impl<T> FieldKey for T
where
    T: ContextKey + fmt::Display,
{
    fn as_context_key(&self) -> &dyn ContextKey {
        self
    }
}

/// Canonical field name for a key.
#[must_use]
pub fn field_name(key: &(impl fmt::Display + ?Sized)) -> String {
    key.to_string()
}

/// Converts a value for storage in [`Fields`].
///
/// Returns `None` when the value fails to serialize (for example a map with
/// non-string keys).
pub(crate) fn field_value<V: Serialize>(value: V) -> Option<serde_json::Value> {
    serde_json::to_value(value).ok()
}

/// Adds one field per key in `keys` that has a renderable value in `ctx`.
///
/// Keys absent from the context, or bound to opaque values, are skipped.
pub(crate) fn collect_context_fields(ctx: &Context, keys: &[&dyn FieldKey], fields: &mut Fields) {
    for key in keys {
        if let Some(value) = ctx.value_json(key.as_context_key()) {
            fields.insert(field_name(*key), value);
        }
    }
}

/// Adds explicit key/value pairs; later duplicates overwrite earlier ones.
pub(crate) fn collect_explicit_fields<I, K, V>(pairs: I, fields: &mut Fields)
where
    I: IntoIterator<Item = (K, V)>,
    K: fmt::Display,
    V: Serialize,
{
    for (key, value) in pairs {
        if let Some(value) = field_value(value) {
            fields.insert(field_name(&key), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Code(u16);

    impl fmt::Display for Code {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "code_{}", self.0)
        }
    }

    #[test]
    fn test_field_name_uses_display() {
        assert_eq!(field_name("k"), "k");
        assert_eq!(field_name(&42), "42");
        assert_eq!(field_name(&Code(7)), "code_7");
    }

    #[test]
    fn test_context_fields_skip_absent_keys() {
        let ctx = Context::background().with_value("request_id", "xyz");
        let mut fields = Fields::new();
        collect_context_fields(&ctx, &[&"request_id", &"missing"], &mut fields);

        assert_eq!(fields.len(), 1);
        assert_eq!(fields["request_id"], json!("xyz"));
    }

    #[test]
    fn test_context_fields_skip_opaque_values() {
        let ctx = Context::background().with_opaque("conn", std::sync::Mutex::new(0u8));
        let mut fields = Fields::new();
        collect_context_fields(&ctx, &[&"conn"], &mut fields);
        assert!(fields.is_empty());
    }

    #[test]
    fn test_context_fields_use_key_display() {
        let ctx = Context::background().with_value(Code(404), true);
        let mut fields = Fields::new();
        collect_context_fields(&ctx, &[&Code(404)], &mut fields);
        assert_eq!(fields["code_404"], json!(true));
    }

    #[test]
    fn test_explicit_duplicates_overwrite_in_order() {
        // 1 and "1" are distinct keys but share a field name.
        let mut fields = Fields::new();
        let pairs = vec![
            (field_name(&1), json!("int")),
            ("1".to_string(), json!("str")),
        ];
        collect_explicit_fields(pairs, &mut fields);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["1"], json!("str"));
    }

    #[test]
    fn test_unserializable_values_are_skipped() {
        let mut bad = std::collections::HashMap::new();
        bad.insert((1, 2), "tuple keys do not serialize");

        let mut fields = Fields::new();
        collect_explicit_fields([("bad", &bad)], &mut fields);
        assert!(fields.is_empty());
    }
}
