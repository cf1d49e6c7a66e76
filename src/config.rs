//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Environment variable holding the expiration interval in milliseconds.
pub const INTERVAL_ENV_VAR: &str = "CACHE_INTERVAL_MS";

/// Interval used when nothing is configured: five minutes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Age after which entries are reaped, also the reaper's wake period
    pub interval: Duration,
}

impl CacheConfig {
    /// Creates a config with the given interval.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_INTERVAL_MS` - Expiration interval in milliseconds (default: 300000)
    ///
    /// Missing or unparsable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            interval: lookup(INTERVAL_ENV_VAR)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_INTERVAL),
        }
    }

    /// Checks that the configuration can back a cache.
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(CacheError::InvalidInterval(self.interval));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.interval, Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_lookup_defaults() {
        let config = CacheConfig::from_lookup(|_| None);
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_config_from_lookup_value() {
        let config = CacheConfig::from_lookup(|name| {
            (name == INTERVAL_ENV_VAR).then(|| " 1500 ".to_string())
        });
        assert_eq!(config.interval, Duration::from_millis(1500));
    }

    #[test]
    fn test_config_from_lookup_unparsable() {
        let config = CacheConfig::from_lookup(|_| Some("five minutes".to_string()));
        assert_eq!(config.interval, DEFAULT_INTERVAL);
    }

    #[test]
    fn test_config_validate_zero() {
        let config = CacheConfig::from_lookup(|_| Some("0".to_string()));
        assert_eq!(
            config.validate(),
            Err(CacheError::InvalidInterval(Duration::ZERO))
        );
    }
}
