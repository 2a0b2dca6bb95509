//! SQLite-backed key-value cache for scraped listing results.
//!
//! This module provides a persistent cache using SQLite with async access
//! via tokio-rusqlite. It supports:
//!
//! - Human-debuggable cache keys derived from a listing filter
//! - JSON value storage with set-with-TTL semantics
//! - Expired entries read as misses, with a purge sweep for housekeeping
//! - Automatic schema migrations and WAL mode for concurrent access

pub mod connection;
pub mod keys;
pub mod migrations;
pub mod store;

pub use crate::Error;

pub use connection::CacheDb;
pub use keys::{complex_key, simple_key};
pub use store::KeyValueCache;
