//! Immutable request context for ctxlog.
//!
//! A [`Context`] is a chain of key/value frames. Deriving a context with
//! [`Context::with_value`] or [`Context::with_opaque`] pushes one frame and
//! shares every ancestor, so a derived context sees all of its parent's
//! bindings while the parent never sees the child's.
//!
//! Keys are any [`ContextKey`]: a `Debug + PartialEq + Send + Sync + 'static`
//! value. Two keys match only when they have the same type and compare
//! equal, so `"id"` (a `&'static str`) and `String::from("id")` are distinct
//! keys.
//!
//! # Example
//!
//! ```
//! use ctxlog_context::Context;
//!
//! let root = Context::background();
//! let ctx = root.with_value("request_id", "abc123");
//!
//! assert_eq!(ctx.value::<&str>(&"request_id"), Some(&"abc123"));
//! assert!(root.value::<&str>(&"request_id").is_none());
//! ```

#![forbid(unsafe_code)]

mod context;
mod key;

pub use context::Context;
pub use key::ContextKey;
