//! The extraction engine: keyword in, ordered product records out.
//!
//! One invocation runs a strict sequence: build the search URL, fetch the
//! page, parse it, extract fields per container, aggregate. The engine keeps
//! no state between invocations, so one value serves any number of
//! concurrent callers without locking.

use anyhow::{Context, Result};
use scraper::Html;
use tracing::info;
use url::Url;

use crate::domain::product::ProductRecord;
use crate::infrastructure::config::{ScraperConfig, marketplace};
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::parsing::search_result_parser::SearchResultParser;
use crate::infrastructure::scrape_error::ScrapeResult;

/// Search scraper for the configured marketplace.
pub struct ProductSearchScraper {
    client: HttpClient,
    parser: SearchResultParser,
    search_base: Url,
}

impl ProductSearchScraper {
    /// Build the engine: HTTP client, compiled selector chains, and the
    /// search endpoint parsed once so URL building stays infallible.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let search_base = Url::parse(&config.search_origin)
            .and_then(|origin| origin.join(marketplace::SEARCH_PATH))
            .with_context(|| format!("invalid search origin: {}", config.search_origin))?;

        Ok(Self {
            client: HttpClient::new(config)?,
            parser: SearchResultParser::new(&config.search_origin)
                .context("failed to build search result parser")?,
            search_base,
        })
    }

    /// Build the search URL for a keyword.
    ///
    /// Pure and deterministic. The keyword goes through the query
    /// serializer, so reserved characters never appear unencoded.
    pub fn build_search_url(&self, keyword: &str) -> String {
        let mut url = self.search_base.clone();
        url.query_pairs_mut()
            .append_pair(marketplace::KEYWORD_PARAM, keyword);
        url.to_string()
    }

    /// Scrape search results for a keyword.
    ///
    /// Fatal failures (timeout, bad status, unreadable body) abort with no
    /// partial results and are never retried here. Containers that fault
    /// individually are dropped inside the parser and only logged.
    pub async fn scrape(&self, keyword: &str) -> ScrapeResult<Vec<ProductRecord>> {
        let url = self.build_search_url(keyword);
        info!("scraping search results for {keyword:?}");

        let body = self.client.fetch(&url).await?;

        // Parse synchronously between awaits; the document tree is not Send.
        let records = {
            let html = Html::parse_document(&body);
            self.parser.parse_records(&html)
        };

        info!(
            "extracted {} product records for {keyword:?}",
            records.len()
        );
        Ok(records)
    }
}
