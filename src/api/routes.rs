//! HTTP handlers for the scraping API.
//!
//! Thin routing and validation over the engine: keyword checks happen here,
//! everything else is the engine's job. Fatal engine errors map to a generic
//! server-error envelope; the engine never retries, so callers re-issue the
//! request themselves.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::api::app::AppState;
use crate::domain::product::ProductRecord;

/// Query parameters accepted by the scrape endpoint.
#[derive(Debug, Deserialize)]
pub struct ScrapeParams {
    pub keyword: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    message: String,
}

#[derive(Serialize)]
pub struct ScrapeResponse {
    success: bool,
    keyword: String,
    count: usize,
    products: Vec<ProductRecord>,
}

#[derive(Serialize)]
pub struct ScrapeFailure {
    success: bool,
    error: String,
    message: String,
}

#[derive(Serialize)]
pub struct ValidationFailure {
    error: String,
}

/// Liveness check.
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            message: "Server is running".to_string(),
        }),
    )
}

/// Scrape search results for the `keyword` query parameter.
///
/// A missing or empty keyword is a client error and never reaches the
/// engine. Engine success returns the `{success, keyword, count, products}`
/// envelope; any fatal engine error becomes a 500 with the error message.
pub async fn scrape_handler(
    State(state): State<AppState>,
    Query(params): Query<ScrapeParams>,
) -> Response {
    let Some(keyword) = params.keyword.filter(|k| !k.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ValidationFailure {
                error: "Missing required parameter: keyword".to_string(),
            }),
        )
            .into_response();
    };

    info!("scrape requested for keyword {keyword:?}");

    match state.scraper.scrape(&keyword).await {
        Ok(products) => (
            StatusCode::OK,
            Json(ScrapeResponse {
                success: true,
                count: products.len(),
                keyword,
                products,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("scrape failed for keyword {keyword:?}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ScrapeFailure {
                    success: false,
                    error: "Failed to scrape products".to_string(),
                    message: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
