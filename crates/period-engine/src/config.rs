//! Configuration property sources.
//!
//! Keys are lower snake case (`time_zones_available`). The environment
//! source reads them from `PERIOD_ENGINE_`-prefixed variables
//! (`PERIOD_ENGINE_TIME_ZONES_AVAILABLE`) through the `config` crate.

use std::collections::HashMap;

use config::{Config, Environment};

use crate::error::PeriodError;

/// Comma-separated list of zone identifiers restricting
/// [`available_time_zones`](crate::available_time_zones).
pub const TIME_ZONES_KEY: &str = "time_zones_available";

/// Prefix for environment variables read by [`EnvConfig`].
pub const ENV_PREFIX: &str = "PERIOD_ENGINE";

/// A source of named configuration properties.
pub trait ConfigSource {
    /// The raw value of `key`, or `None` when unset.
    fn property(&self, key: &str) -> Option<String>;

    /// The value split on commas, trimmed, with empty items dropped.
    fn list(&self, key: &str) -> Option<Vec<String>> {
        let items: Vec<String> = self
            .property(key)?
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if items.is_empty() {
            None
        } else {
            Some(items)
        }
    }
}

/// Properties read from `PERIOD_ENGINE_*` environment variables.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    inner: Config,
}

impl EnvConfig {
    /// Snapshot the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::Config`] if the environment cannot be collected.
    pub fn load() -> Result<Self, PeriodError> {
        Self::build(Environment::with_prefix(ENV_PREFIX))
    }

    /// Read from the given variables instead of the process environment.
    ///
    /// ```
    /// use period_engine::{ConfigSource, EnvConfig, TIME_ZONES_KEY};
    ///
    /// let config = EnvConfig::from_variables([(
    ///     "PERIOD_ENGINE_TIME_ZONES_AVAILABLE",
    ///     "Europe/Paris,UTC",
    /// )])
    /// .unwrap();
    /// assert_eq!(config.list(TIME_ZONES_KEY).unwrap(), ["Europe/Paris", "UTC"]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::Config`] if the variables cannot be collected.
    pub fn from_variables<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Result<Self, PeriodError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let source = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<config::Map<String, String>>();
        Self::build(Environment::with_prefix(ENV_PREFIX).source(Some(source)))
    }

    fn build(environment: Environment) -> Result<Self, PeriodError> {
        let inner = Config::builder().add_source(environment).build()?;
        Ok(EnvConfig { inner })
    }
}

impl ConfigSource for EnvConfig {
    fn property(&self, key: &str) -> Option<String> {
        self.inner.get_string(key).ok()
    }
}

/// In-memory properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapConfig {
    values: HashMap<String, String>,
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigSource for MapConfig {
    fn property(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MapConfig {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
