//! Key-value cache port and its SQLite implementation.
//!
//! The retrieval pipeline only depends on the [`KeyValueCache`] trait:
//! read a JSON value by key, write a JSON value with a TTL. Expired
//! entries read as misses; the rows themselves are removed by the
//! [`CacheDb::purge_expired`] sweep.

use super::connection::CacheDb;
use crate::Error;
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// External key-value store contract used by the retrieval pipeline.
///
/// A `None` from `get_json` covers both "key absent" and "entry expired";
/// callers cannot distinguish the two, and do not need to.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Read a JSON value by key. Missing or expired entries yield `None`.
    async fn get_json<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, Error>;

    /// Write a JSON value under a key, expiring after `ttl`.
    /// Overwrites any existing entry (last writer wins).
    async fn set_json<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), Error>;
}

#[async_trait]
impl KeyValueCache for CacheDb {
    async fn get_json<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, Error> {
        let key = key.to_string();
        let now = Utc::now().to_rfc3339();

        let raw: Option<String> = self
            .conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let mut stmt =
                    conn.prepare("SELECT value FROM listings_cache WHERE key = ?1 AND expires_at > ?2")?;
                match stmt.query_row(params![key, now], |row| row.get(0)) {
                    Ok(value) => Ok(Some(value)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn set_json<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), Error> {
        let key = key.to_string();
        let json = serde_json::to_string(value)?;
        let expires_at = (Utc::now() + chrono::Duration::seconds(ttl.as_secs() as i64)).to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO listings_cache (key, value, expires_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        expires_at = excluded.expires_at",
                    params![key, json, expires_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }
}

impl CacheDb {
    /// Delete expired entries.
    ///
    /// Returns the number of deleted rows. Expired entries are already
    /// invisible to reads; this only reclaims space.
    pub async fn purge_expired(&self) -> Result<u64, Error> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM listings_cache WHERE expires_at <= ?1", params![now])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Listing;

    fn sample_listings() -> Vec<Listing> {
        vec![
            Listing {
                title: "Toyota Corolla 2018".into(),
                year: Some(2018),
                price: 15000.0,
                url: "https://www.neoauto.com/auto/usado/toyota-corolla-2018".into(),
                image_url: "https://cds.neoauto.pe/fotos/corolla.jpg".into(),
            },
            Listing {
                title: "Toyota Yaris 2020".into(),
                year: Some(2020),
                price: 12500.0,
                url: "https://www.neoauto.com/auto/usado/toyota-yaris-2020".into(),
                image_url: "https://cds.neoauto.pe/fotos/yaris.jpg".into(),
            },
        ]
    }

    #[tokio::test]
    async fn test_set_and_get_round_trip() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let listings = sample_listings();

        db.set_json("neoauto:toyota:", &listings, Duration::from_secs(3600))
            .await
            .unwrap();

        let cached: Option<Vec<Listing>> = db.get_json("neoauto:toyota:").await.unwrap();
        assert_eq!(cached.unwrap(), listings);
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let cached: Option<Vec<Listing>> = db.get_json("neoauto:nissan:").await.unwrap();
        assert!(cached.is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_miss() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.set_json("neoauto:toyota:", &sample_listings(), Duration::ZERO)
            .await
            .unwrap();

        let cached: Option<Vec<Listing>> = db.get_json("neoauto:toyota:").await.unwrap();
        assert!(cached.is_none());
    }

    #[tokio::test]
    async fn test_overwrite_is_last_writer_wins() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let ttl = Duration::from_secs(3600);
        let listings = sample_listings();

        db.set_json("neoauto:toyota:", &listings, ttl).await.unwrap();
        db.set_json("neoauto:toyota:", &listings[..1].to_vec(), ttl).await.unwrap();

        let cached: Vec<Listing> = db.get_json("neoauto:toyota:").await.unwrap().unwrap();
        assert_eq!(cached.len(), 1);
    }

    #[tokio::test]
    async fn test_purge_expired_removes_only_stale_rows() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.set_json("stale", &sample_listings(), Duration::ZERO).await.unwrap();
        db.set_json("fresh", &sample_listings(), Duration::from_secs(3600))
            .await
            .unwrap();

        let purged = db.purge_expired().await.unwrap();
        assert_eq!(purged, 1);

        let fresh: Option<Vec<Listing>> = db.get_json("fresh").await.unwrap();
        assert!(fresh.is_some());
    }
}
