//! HTTP routes and wire DTOs.
//!
//! The handler layer decodes wire requests into the domain filter and
//! encodes results back to JSON; the retrieval pipeline never sees
//! transport types.

use std::sync::Arc;

use autoradar_core::{CacheDb, Listing, ListingFilter};
use autoradar_scraper::{ListingService, NeoAutoScraper};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub type SharedService = Arc<ListingService<NeoAutoScraper, CacheDb>>;

/// Wire shape of a search request. Absent bounds mean unconstrained.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub min_year: Option<u32>,
    #[serde(default)]
    pub max_year: Option<u32>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
}

impl From<SearchRequest> for ListingFilter {
    fn from(request: SearchRequest) -> Self {
        Self {
            brand: request.brand,
            model: request.model,
            min_year: request.min_year,
            max_year: request.max_year,
            min_price: request.min_price,
            max_price: request.max_price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub listings: Vec<Listing>,
}

pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/listings/search", post(search))
        .with_state(service)
}

async fn health() -> &'static str {
    "ok"
}

async fn search(
    State(service): State<SharedService>, Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let filter = ListingFilter::from(request);
    let listings = service.find_by_filter(&filter).await?;
    Ok(Json(SearchResponse { listings }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoradar_core::KeyValueCache;
    use autoradar_core::cache::complex_key;
    use autoradar_scraper::ScraperSettings;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    async fn test_router(db: CacheDb) -> Router {
        let scraper = NeoAutoScraper::new(ScraperSettings::default());
        let service = Arc::new(ListingService::new(scraper, db, Duration::from_secs(3600)));
        router(service)
    }

    #[test]
    fn test_request_decodes_with_absent_bounds() {
        let request: SearchRequest = serde_json::from_str(r#"{"brand": "toyota"}"#).unwrap();
        assert_eq!(request.brand, "toyota");
        assert_eq!(request.model, "");
        assert!(request.min_year.is_none());
        assert!(request.max_price.is_none());

        let filter = ListingFilter::from(request);
        assert_eq!(filter.min_price_or_zero(), 0.0);
    }

    #[test]
    fn test_request_decodes_full_bounds() {
        let request: SearchRequest = serde_json::from_str(
            r#"{"brand": "toyota", "model": "corolla",
                "min_year": 2015, "max_year": 2020,
                "min_price": 10000, "max_price": 20000}"#,
        )
        .unwrap();

        let filter = ListingFilter::from(request);
        assert_eq!(filter.min_year, Some(2015));
        assert_eq!(filter.max_price, Some(20000.0));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_router(CacheDb::open_in_memory().await.unwrap()).await;

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_search_serves_cached_result_without_browser() {
        let db = CacheDb::open_in_memory().await.unwrap();

        let filter = ListingFilter {
            brand: "toyota".into(),
            model: "corolla".into(),
            min_price: Some(10000.0),
            max_price: Some(20000.0),
            ..Default::default()
        };
        let cached = vec![Listing {
            title: "Toyota Corolla 2018".into(),
            year: Some(2018),
            price: 15000.0,
            url: "https://www.neoauto.com/auto/usado/toyota-corolla-2018".into(),
            image_url: "https://cds.neoauto.pe/fotos/corolla.jpg".into(),
        }];
        db.set_json(&complex_key(&filter), &cached, Duration::from_secs(3600))
            .await
            .unwrap();

        let app = test_router(db).await;
        let body = r#"{"brand": "toyota", "model": "corolla", "min_price": 10000, "max_price": 20000}"#;
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/listings/search")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let decoded: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded["listings"][0]["title"], "Toyota Corolla 2018");
        assert_eq!(decoded["listings"][0]["price"], 15000.0);
    }
}
