//! Configuration for the scraping service.
//!
//! Two tunables drive the engine (search origin, fetch timeout); the rest is
//! the server bind port and the browser profile presented to the marketplace.
//! Values come from defaults with environment overrides.

use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub server: ServerConfig,
}

/// Settings for the extraction engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Origin used to build search URLs and resolve origin-relative product
    /// links.
    pub search_origin: String,

    /// Hard limit on the single search page fetch, in seconds.
    pub request_timeout_secs: u64,

    /// User agent presented to the marketplace.
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            search_origin: marketplace::ORIGIN.to_string(),
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECONDS,
            user_agent: defaults::USER_AGENT.to_string(),
        }
    }
}

/// Settings for the HTTP API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: defaults::SERVER_PORT,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// `PORT` overrides the bind port, `SHOPSCOUT_TIMEOUT_SECS` the fetch
    /// timeout. Unparsable values fall back silently to the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(port) = env_parse::<u16>("PORT") {
            config.server.port = port;
        }
        if let Some(timeout) = env_parse::<u64>("SHOPSCOUT_TIMEOUT_SECS") {
            config.scraper.request_timeout_secs = timeout;
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|value| value.parse().ok())
}

/// Marketplace URLs used to build search requests and resolve product links.
pub mod marketplace {
    /// Site origin; product links on result pages are relative to this.
    pub const ORIGIN: &str = "https://www.amazon.com";

    /// Path of the search endpoint under the origin.
    pub const SEARCH_PATH: &str = "/s";

    /// Query parameter carrying the search keyword.
    pub const KEYWORD_PARAM: &str = "k";
}

/// Default configuration values.
pub mod defaults {
    /// Default fetch timeout in seconds.
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;

    /// Default bind port for the API server.
    pub const SERVER_PORT: u16 = 3000;

    /// Desktop browser profile presented to the marketplace to reduce the
    /// chance of receiving a block page.
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

    /// Accept header sent with the search request.
    pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml";

    /// Accept-Language header sent with the search request.
    pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
}
