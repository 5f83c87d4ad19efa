//! Marketplace search scraping service.
//!
//! Fetches a search results page for a caller-supplied keyword and extracts
//! structured product records from markup that varies and partially decays
//! over time. The extraction engine lives in [`infrastructure`]; [`api`]
//! exposes it over HTTP.

// Module declarations
pub mod api;
pub mod domain;
pub mod infrastructure;

// Re-export the primary surface
pub use domain::product::ProductRecord;
pub use infrastructure::scrape_error::{ScrapeError, ScrapeResult};
pub use infrastructure::scraping::ProductSearchScraper;
