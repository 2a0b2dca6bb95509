//! Listing extraction from the NeoAuto used-car site.
//!
//! One scrape drives one headless browser session through a search page:
//! navigate, wait for the results container, then walk each listing
//! article independently. Items with missing or malformed parts are
//! skipped; only failure to reach the results container at all aborts
//! the call. Listing markup is not uniform (ads, malformed entries), so
//! this tolerance is load-bearing, not defensive.
//!
//! The selectors below are a contract with the target site's markup; a
//! site redesign degrades extraction to fewer or zero records rather
//! than raising a structural error.

pub mod parse;

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use autoradar_core::{AppConfig, Error, Listing, ListingFilter};
use chromiumoxide::{Element, Page};

use crate::browser::{BrowserSession, query_one, wait_for_element};
use crate::poll::{PollOutcome, poll_until};
use crate::service::ListingSource;

use parse::{RawItem, build_listing};

const BASE_URL: &str = "https://www.neoauto.com/";
const SEARCH_PATH: &str = "venta-de-autos-usados";

/// Sentinel image shown in a carousel slide that has not finished
/// streaming real content.
const LOADER_IMAGE_URL: &str = "https://cds.neoauto.pe/neoauto3/img/loader_black.gif";

const RESULTS_CONTAINER: &str = "div.s-results.js-container.js-results-container";
const ARTICLE: &str = "article";
const ANCHOR: &str = "a.c-results__link";
const CONTENT: &str = "div.c-results__content";
const TITLE: &str = "div.c-results__header > h2";
const RESULT_BODY: &str = "div.c-results__body";
const SLIDES: &str = "ul.glide__slides";
const ACTIVE_SLIDE: &str = "li.glide__slide--active > a";
const CONTACT: &str = "div.c-results-details__contact";
const PRICE: &str = "div.c-results-mount__price";
const PRICE_FALLBACK: &str = "div.c-results-mount__santander-price";

/// Tunables for one extraction call.
#[derive(Debug, Clone)]
pub struct ScraperSettings {
    /// Optional Chrome/Chromium executable override.
    pub chrome_executable: Option<PathBuf>,
    /// Budget for the results container to appear.
    pub navigation_timeout: Duration,
    /// Carousel poll tick.
    pub image_poll_interval: Duration,
    /// Carousel poll budget; on timeout the item is skipped.
    pub image_poll_timeout: Duration,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            chrome_executable: None,
            navigation_timeout: Duration::from_millis(20_000),
            image_poll_interval: Duration::from_millis(1_000),
            image_poll_timeout: Duration::from_millis(3_000),
        }
    }
}

impl From<&AppConfig> for ScraperSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            chrome_executable: config.chrome_executable.clone(),
            navigation_timeout: config.navigation_timeout(),
            image_poll_interval: config.image_poll_interval(),
            image_poll_timeout: config.image_poll_timeout(),
        }
    }
}

/// Browser-driven extractor for NeoAuto search result pages.
pub struct NeoAutoScraper {
    settings: ScraperSettings,
}

impl NeoAutoScraper {
    pub fn new(settings: ScraperSettings) -> Self {
        Self { settings }
    }

    /// Build the search URL for a filter.
    ///
    /// The brand and model become a lowercased, hyphenated path suffix;
    /// numeric bounds are passed as query parameters so the site can
    /// pre-filter server-side (the final bound check still happens
    /// client-side after extraction).
    pub fn search_url(filter: &ListingFilter) -> String {
        let mut url = format!("{BASE_URL}{SEARCH_PATH}");

        if !filter.brand.is_empty() {
            url.push('-');
            url.push_str(&slug(&filter.brand));
            if !filter.model.is_empty() {
                url.push('-');
                url.push_str(&slug(&filter.model));
            }
        }

        let mut params = Vec::new();
        if let Some(min_year) = filter.min_year {
            params.push(format!("min_year={min_year}"));
        }
        if let Some(max_year) = filter.max_year {
            params.push(format!("max_year={max_year}"));
        }
        if let Some(min_price) = filter.min_price {
            params.push(format!("min_price={min_price}"));
        }
        if let Some(max_price) = filter.max_price {
            params.push(format!("max_price={max_price}"));
        }
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }

        url
    }

    async fn scrape_page(&self, session: &BrowserSession, url: &str) -> Result<Vec<Listing>, Error> {
        let page = session.open(url).await?;
        let result = self.extract_listings(&page).await;
        page.close().await.ok();
        result
    }

    async fn extract_listings(&self, page: &Page) -> Result<Vec<Listing>, Error> {
        let container = wait_for_element(page, RESULTS_CONTAINER, self.settings.navigation_timeout).await?;

        let articles = container
            .find_elements(ARTICLE)
            .await
            .map_err(|e| Error::Navigation(e.to_string()))?;

        tracing::debug!(count = articles.len(), "found listing articles");

        let mut listings = Vec::new();
        for article in &articles {
            match self.extract_item(article).await {
                Some(listing) => listings.push(listing),
                None => tracing::debug!("skipping article with missing or malformed fields"),
            }
        }

        tracing::info!(extracted = listings.len(), "extraction finished");
        Ok(listings)
    }

    /// Extract one listing article. Any missing sub-element or parse
    /// failure rejects the item without affecting its siblings.
    async fn extract_item(&self, article: &Element) -> Option<Listing> {
        let anchor = query_one(article, ANCHOR).await?;
        let href = anchor.attribute("href").await.ok().flatten();

        let content = query_one(article, CONTENT).await?;
        let title = match query_one(&content, TITLE).await {
            Some(header) => header.inner_text().await.ok().flatten(),
            None => None,
        };

        let body = query_one(&content, RESULT_BODY).await?;
        let image_url = self.active_slide_image(&body).await;

        let price_text = self.price_text(&content).await;

        build_listing(BASE_URL, RawItem { href, title, price_text, image_url })
    }

    /// Text of the primary price block, falling back to the financing
    /// price block when the primary renders empty.
    async fn price_text(&self, content: &Element) -> Option<String> {
        let contact = query_one(content, CONTACT).await?;

        if let Some(primary) = query_one(&contact, PRICE).await
            && let Ok(Some(text)) = primary.inner_text().await
            && !text.trim().is_empty()
        {
            return Some(text);
        }

        let fallback = query_one(&contact, PRICE_FALLBACK).await?;
        fallback.inner_text().await.ok().flatten()
    }

    /// Image URL of the active carousel slide.
    ///
    /// The slide may transiently show the loader placeholder while
    /// content streams in, so this polls until a real URL appears or the
    /// budget elapses. A timeout rejects the item, not the page.
    async fn active_slide_image(&self, body: &Element) -> Option<String> {
        let slides = query_one(body, SLIDES).await?;
        let slides = &slides;

        let outcome = poll_until(
            self.settings.image_poll_interval,
            self.settings.image_poll_timeout,
            move || async move {
                let anchor = query_one(slides, ACTIVE_SLIDE).await?;
                let image = query_one(&anchor, "img").await?;
                let src = image.attribute("src").await.ok().flatten()?;
                (src != LOADER_IMAGE_URL).then_some(src)
            },
        )
        .await;

        match outcome {
            PollOutcome::Completed(src) => Some(src),
            PollOutcome::TimedOut => {
                tracing::debug!("carousel image never left the loader placeholder");
                None
            }
        }
    }
}

#[async_trait]
impl ListingSource for NeoAutoScraper {
    async fn scrape(&self, filter: &ListingFilter) -> Result<Vec<Listing>, Error> {
        let url = Self::search_url(filter);
        tracing::info!(%url, "scraping listing page");

        let session = BrowserSession::launch(self.settings.chrome_executable.as_deref()).await?;
        let result = self.scrape_page(&session, &url).await;
        session.close().await;

        result
    }
}

fn slug(value: &str) -> String {
    value.trim().to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_brand_only() {
        let filter = ListingFilter { brand: "Toyota".into(), ..Default::default() };
        assert_eq!(
            NeoAutoScraper::search_url(&filter),
            "https://www.neoauto.com/venta-de-autos-usados-toyota"
        );
    }

    #[test]
    fn test_search_url_brand_and_model_are_slugged() {
        let filter = ListingFilter { brand: "Land Rover".into(), model: "Range Rover".into(), ..Default::default() };
        assert_eq!(
            NeoAutoScraper::search_url(&filter),
            "https://www.neoauto.com/venta-de-autos-usados-land-rover-range-rover"
        );
    }

    #[test]
    fn test_search_url_without_brand_has_no_suffix() {
        let filter = ListingFilter::default();
        assert_eq!(NeoAutoScraper::search_url(&filter), "https://www.neoauto.com/venta-de-autos-usados");
    }

    #[test]
    fn test_search_url_appends_bounds_as_query_parameters() {
        let filter = ListingFilter {
            brand: "toyota".into(),
            model: "corolla".into(),
            min_year: Some(2015),
            max_year: Some(2020),
            min_price: Some(10000.0),
            max_price: Some(20000.0),
        };
        assert_eq!(
            NeoAutoScraper::search_url(&filter),
            "https://www.neoauto.com/venta-de-autos-usados-toyota-corolla\
             ?min_year=2015&max_year=2020&min_price=10000&max_price=20000"
        );
    }

    #[tokio::test]
    #[ignore = "requires Chrome/Chromium and network access"]
    async fn test_scrape_live_site() {
        let scraper = NeoAutoScraper::new(ScraperSettings::default());
        let filter = ListingFilter { brand: "toyota".into(), ..Default::default() };
        let listings = scraper.scrape(&filter).await.unwrap();
        for listing in &listings {
            assert!(listing.url.starts_with("https://www.neoauto.com/"));
            assert_ne!(listing.image_url, LOADER_IMAGE_URL);
        }
    }
}
