//! Domain types shared across the retrieval pipeline.

use serde::{Deserialize, Serialize};

/// A normalized used-car search request.
///
/// Absent numeric bounds mean "no constraint on that side". `min <= max`
/// is a caller expectation and is not enforced here; inverted bounds
/// simply select nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingFilter {
    pub brand: String,
    pub model: String,
    pub min_year: Option<u32>,
    pub max_year: Option<u32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ListingFilter {
    /// Minimum year with the absent-bound sentinel applied (0 = unset).
    ///
    /// The zero sentinel makes "unspecified" and "explicitly zero"
    /// indistinguishable downstream, in cache keys and in bound checks.
    /// Accepted limitation: a caller cannot ask for `year <= 0`.
    pub fn min_year_or_zero(&self) -> u32 {
        self.min_year.unwrap_or(0)
    }

    /// Maximum year with the absent-bound sentinel applied (0 = unset).
    pub fn max_year_or_zero(&self) -> u32 {
        self.max_year.unwrap_or(0)
    }

    /// Minimum price with the absent-bound sentinel applied (0 = unset).
    pub fn min_price_or_zero(&self) -> f64 {
        self.min_price.unwrap_or(0.0)
    }

    /// Maximum price with the absent-bound sentinel applied (0 = unset).
    pub fn max_price_or_zero(&self) -> f64 {
        self.max_price.unwrap_or(0.0)
    }
}

/// One structured used-car listing.
///
/// Produced fresh by the extractor or reconstituted from cached JSON.
/// `year` is parsed from the title when the site includes it there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    pub year: Option<u32>,
    pub price: f64,
    pub url: String,
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_bounds_normalize_to_zero() {
        let filter = ListingFilter { brand: "toyota".into(), ..Default::default() };
        assert_eq!(filter.min_year_or_zero(), 0);
        assert_eq!(filter.max_year_or_zero(), 0);
        assert_eq!(filter.min_price_or_zero(), 0.0);
        assert_eq!(filter.max_price_or_zero(), 0.0);
    }

    #[test]
    fn test_present_bounds_pass_through() {
        let filter = ListingFilter {
            brand: "toyota".into(),
            model: "corolla".into(),
            min_year: Some(2015),
            max_year: Some(2020),
            min_price: Some(10000.0),
            max_price: Some(20000.0),
        };
        assert_eq!(filter.min_year_or_zero(), 2015);
        assert_eq!(filter.max_year_or_zero(), 2020);
        assert_eq!(filter.min_price_or_zero(), 10000.0);
        assert_eq!(filter.max_price_or_zero(), 20000.0);
    }

    #[test]
    fn test_listing_json_round_trip() {
        let listing = Listing {
            title: "Toyota Corolla 2018".into(),
            year: Some(2018),
            price: 15000.0,
            url: "https://www.neoauto.com/auto/usado/toyota-corolla-2018".into(),
            image_url: "https://cds.neoauto.pe/fotos/corolla.jpg".into(),
        };
        let json = serde_json::to_string(&listing).unwrap();
        let back: Listing = serde_json::from_str(&json).unwrap();
        assert_eq!(back, listing);
    }
}
