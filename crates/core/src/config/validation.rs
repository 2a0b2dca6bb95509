//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `port` is 0
    /// - `cache_ttl_secs` is 0
    /// - `navigation_timeout_ms` is outside [100ms, 5 minutes]
    /// - `image_poll_interval_ms` is 0 or exceeds `image_poll_timeout_ms`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid { field: "port".into(), reason: "must be greater than 0".into() });
        }

        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_ttl_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.navigation_timeout_ms < 100 {
            return Err(ConfigError::Invalid {
                field: "navigation_timeout_ms".into(),
                reason: "must be at least 100ms".into(),
            });
        }
        if self.navigation_timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "navigation_timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.image_poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "image_poll_interval_ms".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.image_poll_interval_ms > self.image_poll_timeout_ms {
            return Err(ConfigError::Invalid {
                field: "image_poll_interval_ms".into(),
                reason: "must not exceed image_poll_timeout_ms".into(),
            });
        }

        if self.cache_ttl_secs < 60 {
            tracing::warn!(
                cache_ttl_secs = self.cache_ttl_secs,
                "cache TTL is under a minute; nearly every query will trigger a live scrape"
            );
        }

        Ok(())
    }
}
