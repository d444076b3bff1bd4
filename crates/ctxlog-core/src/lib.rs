//! Context-bound structured loggers.
//!
//! This crate lets a logger travel with a request's [`Context`]:
//! - [`bind`] attaches an [`Entry`] to a context once, at request entry
//! - [`logger`], [`logger_with_field`] and [`logger_with_fields`] hand any
//!   function further down the chain that entry, enriched with the context
//!   values it asks for
//! - [`DefaultLogger`] holds the fallback entry used when nothing is bound,
//!   replaceable at runtime with [`set_default`]
//!
//! # Design Principles
//!
//! - Loggers are immutable values; enrichment always returns a new [`Entry`]
//! - The only shared mutable state is the default slot, behind a `RwLock`
//! - Logging never fails the caller: missing bindings fall back to the
//!   default, missing keys are skipped, foreign loggers are ignored
//! - Formatting and output belong to the `log` backend the application
//!   installs
//!
//! # Example
//!
//! ```
//! use ctxlog_core::{Context, Logger};
//!
//! let ctx = Context::background().with_value("request_id", "r-42");
//! let ctx = ctxlog_core::bind(&ctx, ctxlog_core::default_logger().with_field("service", "api"));
//!
//! // Deep in the call chain:
//! let log = ctxlog_core::logger(&ctx, &[&"request_id"]);
//! assert_eq!(log.fields()["service"], "api");
//! assert_eq!(log.fields()["request_id"], "r-42");
//! log.info("loaded profile");
//! ```

#![forbid(unsafe_code)]

mod binder;
pub mod config;
mod default;
mod entry;
mod fields;
pub mod level;
mod logger;
mod resolver;
mod sink;
pub mod testing;

pub use binder::{ContextExt, bind, bound, resolve};
pub use config::{ConfigError, LoggerConfig};
pub use default::{DefaultLogger, default_logger, set_default};
pub use entry::{ERROR_KEY, Entry};
pub use fields::{FieldKey, Fields, field_name};
pub use level::{Level, ParseLevelError};
pub use logger::Logger;
pub use resolver::{logger, logger_with_field, logger_with_fields};
pub use sink::{LogSink, Sink};

// Re-export the context primitive so callers need a single dependency.
pub use ctxlog_context::{Context, ContextKey};
