//! Numeric-bound filtering of extracted listings.

use autoradar_core::{Listing, ListingFilter};

/// Keep the listings that satisfy every numeric bound of the filter.
///
/// A bound of exactly zero is treated as unset, consistent with the
/// cache-key normalization; a caller therefore cannot express
/// "price must be 0 or less" (accepted limitation). A listing without a
/// year fails any active year bound, since it cannot be shown in range.
/// Order-preserving, no dedup, idempotent.
pub fn apply_bounds(filter: &ListingFilter, listings: Vec<Listing>) -> Vec<Listing> {
    let min_price = filter.min_price_or_zero();
    let max_price = filter.max_price_or_zero();
    let min_year = filter.min_year_or_zero();
    let max_year = filter.max_year_or_zero();

    listings
        .into_iter()
        .filter(|listing| {
            if min_price != 0.0 && listing.price < min_price {
                return false;
            }
            if max_price != 0.0 && listing.price > max_price {
                return false;
            }
            if min_year != 0 && listing.year.is_none_or(|year| year < min_year) {
                return false;
            }
            if max_year != 0 && listing.year.is_none_or(|year| year > max_year) {
                return false;
            }
            true
        })
        .collect()
}
