//! ctxlog: request-scoped structured loggers.
//!
//! Attach a logger to an immutable [`Context`] at request entry, pull it
//! back out anywhere below, already carrying the request's fields.
//!
//! # Quick Start
//!
//! ```
//! use ctxlog::prelude::*;
//!
//! fn handle(ctx: &Context) {
//!     let log = ctxlog::logger(ctx, &[&"request_id", &"user"]);
//!     ctx_info!(log, "loading {} items", 3);
//! }
//!
//! let ctx = Context::background()
//!     .with_value("request_id", "r-1")
//!     .with_value("user", "alice")
//!     .with_logger(ctxlog::default_logger().with_field("service", "api"));
//!
//! handle(&ctx);
//! ```
//!
//! # Crates
//!
//! - `ctxlog-context`: the immutable context chain
//! - `ctxlog-core`: loggers, default holder, binding and field resolution
//!
//! Records go to the `log` facade by default; install any `log` backend to
//! see them.

#![forbid(unsafe_code)]

pub use ctxlog_core::*;

/// Prelude module for convenient imports.
///
/// ```
/// use ctxlog::prelude::*;
/// ```
pub mod prelude {
    pub use ctxlog_core::{
        Context, ContextExt, DefaultLogger, Entry, FieldKey, Fields, Level, Logger,
    };
    pub use ctxlog_core::{ctx_debug, ctx_error, ctx_info, ctx_log, ctx_trace, ctx_warn};
}
