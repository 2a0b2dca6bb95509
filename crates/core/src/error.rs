//! Unified error types for autoradar.
//!
//! Only launch-level and page-level failures surface to callers; per-item
//! extraction anomalies are handled by skipping the item at the scrape site.

use tokio_rusqlite::rusqlite;

/// Unified error types for the autoradar service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No Chrome/Chromium executable could be resolved. Fatal, not retried.
    #[error("LAUNCHER_NOT_FOUND: {0}")]
    LauncherNotFound(String),

    /// The browser process failed to launch or connect.
    #[error("BROWSER_LAUNCH_FAILED: {0}")]
    BrowserLaunch(String),

    /// Navigation or element enumeration failed.
    #[error("NAVIGATION_FAILED: {0}")]
    Navigation(String),

    /// The results container never appeared on the page.
    #[error("RESULTS_CONTAINER_NOT_FOUND: selector {0}")]
    ContainerNotFound(String),

    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// A cached value could not be serialized or deserialized.
    #[error("CACHE_ERROR: serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}
