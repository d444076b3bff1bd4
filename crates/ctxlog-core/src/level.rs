//! Log levels and log targets.
//!
//! [`Level`] extends the `log` facade's levels with `Fatal` and `Panic`, the
//! two levels whose calls also terminate the caller. When a record reaches
//! the facade both map to [`log::Level::Error`].
//!
//! # Log Targets
//!
//! ctxlog's own diagnostics use hierarchical targets for filtering:
//!
//! - `ctxlog`: Root target, and the default target of [`LogSink`](crate::LogSink)
//! - `ctxlog::default`: Default logger replacement diagnostics
//!
//! Example filter: `RUST_LOG=ctxlog::default=warn`

use std::fmt;
use std::str::FromStr;

/// Log targets used by ctxlog itself.
pub mod targets {
    /// Root target for all ctxlog logs.
    pub const CTXLOG: &str = "ctxlog";

    /// Default logger holder diagnostics.
    pub const DEFAULT: &str = "ctxlog::default";
}

/// Severity of a log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Wire-level detail.
    Trace,
    /// Request flow and internal decisions.
    Debug,
    /// Lifecycle events.
    Info,
    /// Recoverable issues.
    Warn,
    /// Failures.
    Error,
    /// Logged, then the process exits.
    Fatal,
    /// Logged, then the caller panics.
    Panic,
}

impl Level {
    /// Lowercase name of the level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(pub String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: {}", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            "panic" => Ok(Level::Panic),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => log::Level::Trace,
            Level::Debug => log::Level::Debug,
            Level::Info => log::Level::Info,
            Level::Warn => log::Level::Warn,
            Level::Error | Level::Fatal | Level::Panic => log::Level::Error,
        }
    }
}
