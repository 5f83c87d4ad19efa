//! Router construction and shared state.

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::routes::{health_handler, scrape_handler};
use crate::infrastructure::scraping::ProductSearchScraper;

/// State shared by all request handlers.
///
/// The engine is stateless and reentrant, so one instance behind an `Arc`
/// serves every request concurrently with no locking.
#[derive(Clone)]
pub struct AppState {
    pub scraper: Arc<ProductSearchScraper>,
}

/// Build the API router.
pub fn build_router(scraper: Arc<ProductSearchScraper>) -> Router {
    let state = AppState { scraper };

    // Browser clients call this API cross-origin, so CORS stays open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/scrape", get(scrape_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
