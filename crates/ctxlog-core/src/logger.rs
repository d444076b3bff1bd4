//! The logger capability.

use std::any::Any;
use std::fmt;

use crate::{Entry, Level};

/// Leveled, field-enrichable logging.
///
/// Every level has a plain variant taking a message and a formatted variant
/// taking [`fmt::Arguments`] (usually built by the `ctx_*!` macros).
/// Implementations must be immutable: enrichment returns a new [`Entry`] and
/// never changes a logger already handed out.
///
/// The trait is object safe; the default-logger holder accepts
/// `&dyn Logger` and keeps only loggers that are [`Entry`] values.
pub trait Logger: Send + Sync + 'static {
    /// Emits a record at `level`.
    fn log(&self, level: Level, args: fmt::Arguments<'_>);

    /// Returns an entry carrying `err` under the `error` field.
    fn with_error(&self, err: &dyn std::error::Error) -> Entry;

    /// Returns the logger as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Logs at info level.
    fn print(&self, msg: &str) {
        self.log(Level::Info, format_args!("{msg}"));
    }

    /// Logs formatted arguments at info level.
    fn printf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    /// Logs at trace level.
    fn trace(&self, msg: &str) {
        self.log(Level::Trace, format_args!("{msg}"));
    }

    /// Logs formatted arguments at trace level.
    fn tracef(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args);
    }

    /// Logs at debug level.
    fn debug(&self, msg: &str) {
        self.log(Level::Debug, format_args!("{msg}"));
    }

    /// Logs formatted arguments at debug level.
    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    /// Logs at info level.
    fn info(&self, msg: &str) {
        self.log(Level::Info, format_args!("{msg}"));
    }

    /// Logs formatted arguments at info level.
    fn infof(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    /// Logs at warn level.
    fn warn(&self, msg: &str) {
        self.log(Level::Warn, format_args!("{msg}"));
    }

    /// Logs formatted arguments at warn level.
    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    /// Logs at error level.
    fn error(&self, msg: &str) {
        self.log(Level::Error, format_args!("{msg}"));
    }

    /// Logs formatted arguments at error level.
    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    /// Logs at fatal level, then exits the process with status 1.
    fn fatal(&self, msg: &str) -> ! {
        self.log(Level::Fatal, format_args!("{msg}"));
        std::process::exit(1)
    }

    /// Logs formatted arguments at fatal level, then exits with status 1.
    fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.log(Level::Fatal, args);
        std::process::exit(1)
    }

    /// Logs at panic level, then panics with the message.
    fn panic(&self, msg: &str) -> ! {
        self.log(Level::Panic, format_args!("{msg}"));
        panic!("{msg}")
    }

    /// Logs formatted arguments at panic level, then panics with them.
    fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        let msg = args.to_string();
        self.log(Level::Panic, format_args!("{msg}"));
        panic!("{msg}")
    }
}

/// Emits a formatted record at an explicit level on any [`Logger`].
///
/// ```ignore
/// ctx_log!(logger, Level::Warn, "retrying {} in {}ms", op, delay);
/// ```
#[macro_export]
macro_rules! ctx_log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        {
            use $crate::Logger as _;
            ($logger).log($level, format_args!($($arg)+))
        }
    };
}

/// Emits a formatted trace record on any [`Logger`].
#[macro_export]
macro_rules! ctx_trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::ctx_log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Emits a formatted debug record on any [`Logger`].
#[macro_export]
macro_rules! ctx_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::ctx_log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Emits a formatted info record on any [`Logger`].
///
/// ```ignore
/// let log = ctxlog_core::logger(&ctx, &[&"request_id"]);
/// ctx_info!(log, "handled {} in {}ms", path, elapsed);
/// ```
#[macro_export]
macro_rules! ctx_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::ctx_log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Emits a formatted warn record on any [`Logger`].
#[macro_export]
macro_rules! ctx_warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::ctx_log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Emits a formatted error record on any [`Logger`].
#[macro_export]
macro_rules! ctx_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::ctx_log!($logger, $crate::Level::Error, $($arg)+)
    };
}
