//! Core types and shared functionality for autoradar.
//!
//! This crate provides:
//! - Domain types (listing filter, listing record)
//! - Cache-key derivation and the key-value cache port
//! - SQLite-backed cache implementation with TTL semantics
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod domain;
pub mod error;

pub use cache::{CacheDb, KeyValueCache};
pub use config::AppConfig;
pub use domain::{Listing, ListingFilter};
pub use error::Error;
