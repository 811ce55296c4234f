//! Runtime configuration for the tracker.
//!
//! Settings come from [`TrackerConfig::default`], optionally a JSON
//! document, and finally environment overrides.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding [`TrackerConfig::store_timeout_ms`].
pub const STORE_TIMEOUT_ENV: &str = "TASKCLOCK_STORE_TIMEOUT_MS";
/// Environment variable overriding [`TrackerConfig::tick_interval_ms`].
pub const TICK_INTERVAL_ENV: &str = "TASKCLOCK_TICK_INTERVAL_MS";
/// Environment variable overriding [`TrackerConfig::database_url`].
pub const DATABASE_URL_ENV: &str = "TASKCLOCK_DATABASE_URL";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be decoded.
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),

    /// An override was not a non-negative integer.
    #[error("invalid value '{value}' for {key}, expected milliseconds")]
    InvalidNumber {
        /// Variable name.
        key: &'static str,
        /// Rejected value.
        value: String,
    },

    /// A duration setting was zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// A database-backed store was requested without a connection string.
    #[error("no database URL configured; set TASKCLOCK_DATABASE_URL")]
    MissingDatabaseUrl,
}

/// Tracker settings.
///
/// # Examples
///
/// ```
/// use taskclock::config::TrackerConfig;
///
/// let config = TrackerConfig::default();
/// assert_eq!(config.tick_interval().as_secs(), 1);
///
/// let parsed = TrackerConfig::from_json_str(r#"{"store_timeout_ms": 250}"#)
///     .expect("valid configuration");
/// assert_eq!(parsed.store_timeout().as_millis(), 250);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Limit for a single remote store call, in milliseconds.
    pub store_timeout_ms: u64,
    /// Countdown refresh period, in milliseconds.
    pub tick_interval_ms: u64,
    /// Connection string for the `PostgreSQL` store, if one is used.
    pub database_url: Option<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: 5_000,
            tick_interval_ms: 1_000,
            database_url: None,
        }
    }
}

impl TrackerConfig {
    /// Creates a configuration for fast, local stores such as the in-memory
    /// one.
    #[must_use]
    pub const fn local() -> Self {
        Self {
            store_timeout_ms: 500,
            tick_interval_ms: 1_000,
            database_url: None,
        }
    }

    /// Decodes a JSON document; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed documents and
    /// [`ConfigError::ZeroDuration`] for zero durations.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the default configuration with process environment overrides.
    ///
    /// # Errors
    ///
    /// See [`TrackerConfig::with_overrides`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up by variable name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] when a duration override is not
    /// an integer and [`ConfigError::ZeroDuration`] when the result has a
    /// zero duration.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(STORE_TIMEOUT_ENV) {
            self.store_timeout_ms = parse_millis(STORE_TIMEOUT_ENV, &value)?;
        }
        if let Some(value) = lookup(TICK_INTERVAL_ENV) {
            self.tick_interval_ms = parse_millis(TICK_INTERVAL_ENV, &value)?;
        }
        if let Some(value) = lookup(DATABASE_URL_ENV) {
            let trimmed = value.trim();
            self.database_url = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks that both durations are non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroDuration`] naming the offending setting.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.store_timeout_ms == 0 {
            return Err(ConfigError::ZeroDuration("store_timeout_ms"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration("tick_interval_ms"));
        }
        Ok(())
    }

    /// Returns the configured connection string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when none is set.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)
    }

    /// Returns the per-call store limit.
    #[must_use]
    pub const fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    /// Returns the countdown refresh period.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

fn parse_millis(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_owned(),
        })
}
