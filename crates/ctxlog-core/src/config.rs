//! Configuration for the baseline default logger.
//!
//! `LoggerConfig` describes the entry the process-wide
//! [`DefaultLogger`](crate::DefaultLogger) starts with: the `log` target its
//! records go to, and static fields (service name, environment, ...) every
//! record carries unless a context-bound logger replaces it.

use std::env;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::level::targets;
use crate::{Entry, Fields, LogSink};

/// Environment variable overriding the log target.
pub const TARGET_ENV: &str = "CTXLOG_TARGET";

/// Environment variable with static fields, as `key=value` pairs separated
/// by commas.
pub const FIELDS_ENV: &str = "CTXLOG_FIELDS";

/// Settings for the baseline entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    /// `log` target records are emitted under.
    pub target: String,
    /// Fields attached to every record from the baseline entry.
    pub fields: Fields,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            target: targets::CTXLOG.to_string(),
            fields: Fields::new(),
        }
    }
}

/// Error returned when configuration cannot be parsed.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML syntax or schema error.
    Toml(toml::de::Error),
    /// A `key=value` pair without `=` or with an empty key.
    InvalidField(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Toml(e) => write!(f, "invalid logger config: {e}"),
            ConfigError::InvalidField(pair) => write!(f, "invalid field pair: {pair:?}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Toml(e) => Some(e),
            ConfigError::InvalidField(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Toml(err)
    }
}

impl LoggerConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables
    ///
    /// # Environment Variables
    ///
    /// | Variable | Values | Description |
    /// |----------|--------|-------------|
    /// | `CTXLOG_TARGET` | any | Log target |
    /// | `CTXLOG_FIELDS` | `k=v,k2=v2` | Static fields |
    ///
    /// Malformed field pairs are skipped and reported as a warning; the
    /// default logger must come up even with a broken environment.
    #[must_use]
    pub fn from_env() -> Self {
        let (config, skipped) = Self::from_env_lenient();
        for err in skipped {
            log::warn!(target: targets::CTXLOG, "{FIELDS_ENV}: {err}");
        }
        config
    }

    /// Like [`from_env`](Self::from_env), but hands the skipped field pairs
    /// back to the caller instead of logging them.
    ///
    /// Nothing is written to the `log` facade, so this is safe to call while
    /// the process-wide default is still being initialized.
    #[must_use]
    pub fn from_env_lenient() -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut skipped = Vec::new();

        if let Ok(target) = env::var(TARGET_ENV) {
            let target = target.trim();
            if !target.is_empty() {
                config.target = target.to_string();
            }
        }

        if let Ok(raw) = env::var(FIELDS_ENV) {
            for pair in split_pairs(&raw) {
                match parse_pair(pair) {
                    Ok((key, value)) => {
                        config.fields.insert(key, value);
                    }
                    Err(err) => skipped.push(err),
                }
            }
        }

        (config, skipped)
    }

    /// Parses a TOML document:
    ///
    /// ```
    /// use ctxlog_core::LoggerConfig;
    ///
    /// let config = LoggerConfig::from_toml_str(r#"
    ///     target = "billing"
    ///
    ///     [fields]
    ///     service = "billing"
    ///     shard = 3
    /// "#).unwrap();
    ///
    /// assert_eq!(config.target, "billing");
    /// assert_eq!(config.fields["shard"], 3);
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Parses a `key=value,key2=value2` field list, failing on the first
    /// malformed pair.
    pub fn parse_fields(raw: &str) -> Result<Fields, ConfigError> {
        split_pairs(raw).map(parse_pair).collect()
    }

    /// Set the log target
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Add a static field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Builds the baseline entry: a [`LogSink`] on the configured target
    /// carrying the configured fields.
    #[must_use]
    pub fn build(&self) -> Entry {
        Entry::new(Arc::new(LogSink::new(self.target.clone()))).with_fields(self.fields.clone())
    }
}

fn split_pairs(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|pair| !pair.is_empty())
}

fn parse_pair(pair: &str) -> Result<(String, serde_json::Value), ConfigError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((
            key.trim().to_string(),
            serde_json::Value::String(value.trim().to_string()),
        )),
        _ => Err(ConfigError::InvalidField(pair.to_string())),
    }
}
