//! Listing extraction and retrieval pipeline for autoradar.
//!
//! This crate drives a headless browser against the NeoAuto listing site,
//! turns rendered DOM content into structured listing records, and wraps
//! the whole thing in a cache-first retrieval service.

pub mod browser;
pub mod filter;
pub mod neoauto;
pub mod poll;
pub mod service;

pub use browser::BrowserSession;
pub use filter::apply_bounds;
pub use neoauto::{NeoAutoScraper, ScraperSettings};
pub use poll::{PollOutcome, poll_until};
pub use service::{ListingService, ListingSource};
