//! Cache-key derivation from a listing filter.
//!
//! Two key shapes address two granularities of cached results:
//!
//! - *simple*: brand/model only, addressing the unfiltered scrape result
//!   shared by every query for that pair.
//! - *complex*: all six filter fields, addressing the final filtered
//!   result of one exact query.
//!
//! Both shapes are namespaced by the source site. Absent bounds are
//! normalized to zero before formatting, so "unspecified" and
//! "explicitly zero" produce the same key. The `:min-price:` segment
//! keeps the complex shape out of the simple shape's namespace.

use crate::domain::ListingFilter;

const KEY_NAMESPACE: &str = "neoauto";

/// Key addressing the raw (unfiltered) scrape result for a brand/model pair.
pub fn simple_key(filter: &ListingFilter) -> String {
    format!("{}:{}:{}", KEY_NAMESPACE, filter.brand, filter.model)
}

/// Key addressing the filtered result of one exact filter.
pub fn complex_key(filter: &ListingFilter) -> String {
    format!(
        "{}:{}:{}:min-price:{:.2}:max-price:{:.2}:min-year:{}:max-year:{}",
        KEY_NAMESPACE,
        filter.brand,
        filter.model,
        filter.min_price_or_zero(),
        filter.max_price_or_zero(),
        filter.min_year_or_zero(),
        filter.max_year_or_zero(),
    )
}
