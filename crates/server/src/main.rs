//! autoradar server entry point.
//!
//! Boots the HTTP API: loads configuration, opens the cache database,
//! wires the retrieval service, and serves until a shutdown signal.

use std::sync::Arc;

use anyhow::{Context, Result};
use autoradar_core::{AppConfig, CacheDb};
use autoradar_scraper::{ListingService, NeoAutoScraper, ScraperSettings};
use tracing_subscriber::EnvFilter;

mod error;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::info!(port = config.port, db = %config.db_path.display(), "configuration loaded");

    let db = CacheDb::open(&config.db_path)
        .await
        .context("failed to open cache database")?;

    // Expired entries already read as misses; this sweep reclaims space.
    let sweeper = db.clone();
    let sweep_every = config.cache_ttl();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_every);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match sweeper.purge_expired().await {
                Ok(purged) if purged > 0 => tracing::debug!(purged, "purged expired cache entries"),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "cache purge sweep failed"),
            }
        }
    });

    let scraper = NeoAutoScraper::new(ScraperSettings::from(&config));
    let service = Arc::new(ListingService::new(scraper, db, config.cache_ttl()));

    let app = routes::router(service);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(%addr, "starting autoradar server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("failed to bind listen address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
