//! Cache-first listing retrieval.
//!
//! The service composes the cache port, the listing extractor, and the
//! record filter into one pipeline:
//!
//! 1. exact-filter (complex key) lookup -> hit returns verbatim
//! 2. brand/model (simple key) lookup -> hit yields raw records
//! 3. miss -> live scrape, raw result stored under the simple key
//! 4. numeric bounds applied, filtered result stored under the complex key
//!
//! Cache reads fail open (a backend error is just a miss), cache writes
//! are best-effort (logged and swallowed), and only extraction failures
//! propagate to the caller. For a fixed brand/model at most one live
//! extraction happens per TTL window for sequential callers; concurrent
//! misses may each scrape and idempotently overwrite each other.

use std::time::Duration;

use async_trait::async_trait;
use autoradar_core::cache::{complex_key, simple_key};
use autoradar_core::{Error, KeyValueCache, Listing, ListingFilter};
use serde::Serialize;

use crate::filter::apply_bounds;

/// A source of raw listing records for a filter's search page.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Extract raw (unfiltered) listings for the filter's brand/model.
    async fn scrape(&self, filter: &ListingFilter) -> Result<Vec<Listing>, Error>;
}

/// Cache-first retrieval pipeline over a listing source.
pub struct ListingService<S, C> {
    source: S,
    cache: C,
    ttl: Duration,
}

impl<S: ListingSource, C: KeyValueCache> ListingService<S, C> {
    pub fn new(source: S, cache: C, ttl: Duration) -> Self {
        Self { source, cache, ttl }
    }

    /// Answer a filtered query, scraping only when the cache cannot.
    pub async fn find_by_filter(&self, filter: &ListingFilter) -> Result<Vec<Listing>, Error> {
        let complex = complex_key(filter);
        if let Some(filtered) = self.cache_get(&complex).await {
            tracing::debug!(key = %complex, count = filtered.len(), "exact-filter cache hit");
            return Ok(filtered);
        }

        let simple = simple_key(filter);
        let raw = match self.cache_get(&simple).await {
            Some(raw) => {
                tracing::debug!(key = %simple, count = raw.len(), "raw-scrape cache hit");
                raw
            }
            None => {
                let scraped = self.source.scrape(filter).await?;
                self.cache_put(&simple, &scraped).await;
                scraped
            }
        };

        let filtered = apply_bounds(filter, raw);
        self.cache_put(&complex, &filtered).await;

        tracing::info!(count = filtered.len(), "listing query answered");
        Ok(filtered)
    }

    /// Cache read that fails open: a backend error is logged and treated
    /// as a miss, falling through to extraction.
    async fn cache_get(&self, key: &str) -> Option<Vec<Listing>> {
        match self.cache.get_json(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Best-effort cache write; failure never blocks the response.
    async fn cache_put<T: Serialize + Send + Sync>(&self, key: &str, value: &T) {
        if let Err(e) = self.cache.set_json(key, value, self.ttl).await {
            tracing::warn!(key, error = %e, "cache write failed, continuing without it");
        }
    }
}
