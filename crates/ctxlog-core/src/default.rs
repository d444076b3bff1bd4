//! The process-wide fallback logger.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::config::{ConfigError, FIELDS_ENV};
use crate::level::targets;
use crate::{Entry, Logger, LoggerConfig};

static GLOBAL: OnceLock<DefaultLogger> = OnceLock::new();

/// Holder for the logger used when a context has none bound.
///
/// The slot always holds exactly one [`Entry`]. Readers clone it under a
/// read lock; [`set`](Self::set) swaps it under the write lock, so a reader
/// racing a writer sees either the old or the new entry, never a mix.
///
/// Most code uses the process-wide instance through the free functions
/// ([`resolve`](crate::resolve), [`logger`](crate::logger),
/// [`set_default`](crate::set_default), ...). Code that wants isolation,
/// tests in particular, can own a holder and call the same operations as
/// methods:
///
/// ```
/// use ctxlog_core::{Context, DefaultLogger};
/// use ctxlog_core::testing::TestLogger;
///
/// let test = TestLogger::new();
/// let holder = DefaultLogger::new(test.entry());
///
/// let log = holder.logger(&Context::background(), &[]);
/// assert!(log.same_as(&test.entry()));
/// ```
#[derive(Debug)]
pub struct DefaultLogger {
    slot: RwLock<Entry>,
    rejected: AtomicU64,
}

impl Default for DefaultLogger {
    fn default() -> Self {
        Self::new(Entry::default())
    }
}

impl DefaultLogger {
    /// Creates a holder seeded with `entry`.
    #[must_use]
    pub fn new(entry: Entry) -> Self {
        Self {
            slot: RwLock::new(entry),
            rejected: AtomicU64::new(0),
        }
    }

    /// Returns the process-wide holder.
    ///
    /// Seeded on first use from [`LoggerConfig::from_env_lenient`]. Skipped
    /// `CTXLOG_FIELDS` pairs are logged only once the holder is in place, so
    /// a backend that calls back into ctxlog sees the finished holder.
    pub fn global() -> &'static DefaultLogger {
        Self::get_or_seed(&GLOBAL, LoggerConfig::from_env_lenient)
    }

    fn get_or_seed(
        cell: &OnceLock<Self>,
        load: impl FnOnce() -> (LoggerConfig, Vec<ConfigError>),
    ) -> &Self {
        let mut skipped = Vec::new();
        let holder = cell.get_or_init(|| {
            let (config, errors) = load();
            skipped = errors;
            Self::new(config.build())
        });
        for err in skipped {
            log::warn!(target: targets::CTXLOG, "{FIELDS_ENV}: {err}");
        }
        holder
    }

    /// Returns the current default entry.
    #[must_use]
    pub fn get(&self) -> Entry {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the default with `logger` if it is an [`Entry`].
    ///
    /// Any other logger type is rejected: the slot keeps its current entry,
    /// the rejection counter is bumped, and the first rejection is reported
    /// once as a warning on the `ctxlog::default` target. Returns whether
    /// the slot was replaced.
    pub fn set(&self, logger: &dyn Logger) -> bool {
        let Some(entry) = logger.as_any().downcast_ref::<Entry>() else {
            if self.rejected.fetch_add(1, Ordering::Relaxed) == 0 {
                log::warn!(
                    target: targets::DEFAULT,
                    "ignoring default logger replacement: only ctxlog entries can be stored"
                );
            }
            return false;
        };

        let entry = entry.clone();
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = entry;
        true
    }

    /// Returns how many replacements were rejected.
    #[must_use]
    pub fn rejected_replacements(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }
}

/// Replaces the process-wide default logger.
///
/// Loggers that are not [`Entry`] values are ignored; see
/// [`DefaultLogger::set`].
pub fn set_default(logger: &dyn Logger) -> bool {
    DefaultLogger::global().set(logger)
}

/// Returns the process-wide default logger.
#[must_use]
pub fn default_logger() -> Entry {
    DefaultLogger::global().get()
}
