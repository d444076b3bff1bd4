//! Attaching loggers to contexts and getting them back.

use std::sync::Arc;

use crate::{Context, DefaultLogger, Entry, FieldKey, Logger};

/// Private context key for the bound logger.
#[derive(Debug, PartialEq)]
struct LoggerKey;

/// Returns a context derived from `ctx` with `logger` bound to it.
///
/// `ctx` itself is unchanged. Binding again on a derived context shadows
/// the earlier logger for that branch only.
#[must_use]
pub fn bind<L: Logger>(ctx: &Context, logger: L) -> Context {
    let logger: Arc<dyn Logger> = Arc::new(logger);
    ctx.with_opaque(LoggerKey, logger)
}

/// Returns the entry bound to `ctx`, without falling back to the default.
///
/// Loggers of a type other than [`Entry`] are treated as unbound.
#[must_use]
pub fn bound(ctx: &Context) -> Option<Entry> {
    ctx.value::<Arc<dyn Logger>>(&LoggerKey)?
        .as_any()
        .downcast_ref::<Entry>()
        .cloned()
}

impl DefaultLogger {
    /// Returns the entry bound to `ctx`, or this holder's default.
    #[must_use]
    pub fn resolve(&self, ctx: &Context) -> Entry {
        bound(ctx).unwrap_or_else(|| self.get())
    }
}

/// Returns the entry bound to `ctx`, or the process-wide default.
///
/// Never fails. The bound entry is returned as is (a clone sharing its
/// fields), so `resolve(&bind(&ctx, entry.clone()))` is `entry`.
#[must_use]
pub fn resolve(ctx: &Context) -> Entry {
    DefaultLogger::global().resolve(ctx)
}

/// Logger helpers as methods on [`Context`].
///
/// ```
/// use ctxlog_core::{Context, ContextExt, Logger};
/// use ctxlog_core::testing::TestLogger;
///
/// let test = TestLogger::new();
/// let ctx = Context::background()
///     .with_value("request_id", "r-7")
///     .with_logger(test.entry());
///
/// ctx.logger(&[&"request_id"]).info("handled");
/// assert_eq!(test.last().unwrap().fields["request_id"], "r-7");
/// ```
pub trait ContextExt {
    /// Same as [`bind`].
    #[must_use]
    fn with_logger<L: Logger>(&self, logger: L) -> Context;

    /// Same as [`logger`](crate::logger).
    #[must_use]
    fn logger(&self, keys: &[&dyn FieldKey]) -> Entry;
}

impl ContextExt for Context {
    fn with_logger<L: Logger>(&self, logger: L) -> Context {
        bind(self, logger)
    }

    fn logger(&self, keys: &[&dyn FieldKey]) -> Entry {
        crate::logger(self, keys)
    }
}
