//! Pure parsing helpers for NeoAuto listing markup.
//!
//! Everything DOM-shaped stays in the scraper; this module only turns
//! already-extracted text and attributes into record fields, so the
//! skip-on-malformed-item logic is testable without a browser.

use autoradar_core::Listing;
use url::Url;

/// Raw fields pulled from one listing article, before validation.
///
/// Any `None` (or any unparsable text) makes the whole item unusable;
/// the extraction loop skips it rather than failing the page.
#[derive(Debug, Default)]
pub struct RawItem {
    pub href: Option<String>,
    pub title: Option<String>,
    pub price_text: Option<String>,
    pub image_url: Option<String>,
}

/// Assemble a listing from raw item fields, or reject the item.
pub fn build_listing(base_url: &str, raw: RawItem) -> Option<Listing> {
    let href = raw.href?;
    let title = raw.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())?;
    let year = year_from_title(&title);
    let price = parse_price(&raw.price_text?)?;
    let image_url = raw.image_url?;
    let url = absolute_url(base_url, &href)?;

    Some(Listing { title, year, price, url, image_url })
}

/// Parse a price out of a price-block text.
///
/// Strips thousands-separator commas, then parses the last
/// whitespace-separated token as a float: `"US$ 15,500"` -> `15500.0`.
/// A non-numeric trailing token is a parse failure.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");
    let last = cleaned.split_whitespace().last()?;
    last.parse::<f64>().ok().filter(|price| *price >= 0.0)
}

/// Parse a model year from the trailing 4 characters of a title.
///
/// The site's title format ends with the year (`"Toyota Corolla 2018"`);
/// titles without it simply yield no year.
pub fn year_from_title(title: &str) -> Option<u32> {
    let tail: String = title.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    if tail.len() == 4 && tail.chars().all(|c| c.is_ascii_digit()) {
        tail.parse().ok()
    } else {
        None
    }
}

/// Resolve a listing href against the site base URL.
fn absolute_url(base_url: &str, href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    let base = Url::parse(base_url).ok()?;
    base.join(href).ok().map(String::from)
}
