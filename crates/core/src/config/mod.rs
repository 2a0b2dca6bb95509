//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (AUTORADAR_*)
//! 2. TOML config file (if AUTORADAR_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (AUTORADAR_*)
/// 2. TOML config file (if AUTORADAR_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listen port.
    ///
    /// Set via AUTORADAR_PORT environment variable.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the SQLite cache database.
    ///
    /// Set via AUTORADAR_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// TTL for cached scrape results, in seconds.
    ///
    /// Applies to both the raw (brand/model) and filtered (exact query)
    /// cache entries. Staleness is bounded only by this TTL; there is
    /// no explicit invalidation path.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Budget for the results container to appear after navigation, in ms.
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    /// Interval between carousel image polls, in ms.
    #[serde(default = "default_image_poll_interval_ms")]
    pub image_poll_interval_ms: u64,

    /// Overall budget for one carousel image to leave the loader
    /// placeholder, in ms. On timeout the item is skipped.
    #[serde(default = "default_image_poll_timeout_ms")]
    pub image_poll_timeout_ms: u64,

    /// Optional path to a Chrome/Chromium executable.
    ///
    /// When unset, the browser binary is auto-detected; failure to
    /// resolve one is a fatal configuration error at scrape time.
    #[serde(default)]
    pub chrome_executable: Option<PathBuf>,
}

fn default_port() -> u16 {
    8080
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./autoradar-cache.sqlite")
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_navigation_timeout_ms() -> u64 {
    20_000
}

fn default_image_poll_interval_ms() -> u64 {
    1_000
}

fn default_image_poll_timeout_ms() -> u64 {
    3_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            db_path: default_db_path(),
            cache_ttl_secs: default_cache_ttl_secs(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
            image_poll_interval_ms: default_image_poll_interval_ms(),
            image_poll_timeout_ms: default_image_poll_timeout_ms(),
            chrome_executable: None,
        }
    }
}

impl AppConfig {
    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Results-container wait budget as a Duration.
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    /// Carousel poll tick as a Duration.
    pub fn image_poll_interval(&self) -> Duration {
        Duration::from_millis(self.image_poll_interval_ms)
    }

    /// Carousel poll budget as a Duration.
    pub fn image_poll_timeout(&self) -> Duration {
        Duration::from_millis(self.image_poll_timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `AUTORADAR_`
    /// 2. TOML file from `AUTORADAR_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or parsed, or
    /// if validation fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("AUTORADAR_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("AUTORADAR_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.db_path, PathBuf::from("./autoradar-cache.sqlite"));
        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.navigation_timeout_ms, 20_000);
        assert_eq!(config.image_poll_interval_ms, 1_000);
        assert_eq!(config.image_poll_timeout_ms, 3_000);
        assert!(config.chrome_executable.is_none());
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.navigation_timeout(), Duration::from_millis(20_000));
        assert_eq!(config.image_poll_interval(), Duration::from_millis(1_000));
        assert_eq!(config.image_poll_timeout(), Duration::from_millis(3_000));
    }
}
