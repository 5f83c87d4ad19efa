//! API server entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use shopscout::api::build_router;
use shopscout::infrastructure::config::AppConfig;
use shopscout::infrastructure::logging::init_logging;
use shopscout::infrastructure::scraping::ProductSearchScraper;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = AppConfig::from_env();
    let scraper = Arc::new(
        ProductSearchScraper::new(&config.scraper).context("failed to build search scraper")?,
    );
    let app = build_router(scraper);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("server running on http://localhost:{}", config.server.port);
    info!("endpoints: GET /api/health, GET /api/scrape?keyword=...");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
