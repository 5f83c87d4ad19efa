//! Infrastructure layer: configuration, fetching, parsing, and logging.

pub mod config;
pub mod http_client;
pub mod logging;
pub mod parsing;
pub mod scrape_error;
pub mod scraping;

// Re-export commonly used items
pub use config::AppConfig;
pub use http_client::HttpClient;
pub use logging::init_logging;
pub use parsing::{SearchResultParser, SelectorChains};
pub use scrape_error::{ExtractError, ScrapeError, ScrapeResult};
pub use scraping::ProductSearchScraper;
