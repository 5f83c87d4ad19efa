//! HTTP fetcher for marketplace search pages.
//!
//! One request per scrape with browser-profile headers and a fixed timeout.
//! No retry: a single failed attempt fails the whole operation, and callers
//! decide whether to re-issue it.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::infrastructure::config::{ScraperConfig, defaults};
use crate::infrastructure::scrape_error::{ScrapeError, ScrapeResult};

/// HTTP client presenting a common desktop browser profile.
pub struct HttpClient {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpClient {
    /// Build the underlying client once with default headers and the
    /// configured timeout.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("invalid user agent")?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(defaults::ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(defaults::ACCEPT_LANGUAGE),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .default_headers(headers)
            .gzip(true)
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            timeout_secs: config.request_timeout_secs,
        })
    }

    /// Fetch one page and return its raw body.
    ///
    /// Exceeding the timeout maps to [`ScrapeError::Timeout`], a non-success
    /// status to [`ScrapeError::FetchError`] carrying that status, and a body
    /// that cannot be read to [`ScrapeError::ParseError`].
    pub async fn fetch(&self, url: &str) -> ScrapeResult<String> {
        debug!("fetching {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::fetch_status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ScrapeError::timeout(self.timeout_secs)
            } else {
                ScrapeError::parse(format!("failed to read response body: {e}"))
            }
        })?;

        debug!("fetched {} bytes from {url}", body.len());
        Ok(body)
    }

    fn classify_transport(&self, error: reqwest::Error) -> ScrapeError {
        if error.is_timeout() {
            ScrapeError::timeout(self.timeout_secs)
        } else {
            ScrapeError::fetch_transport(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_with_default_config() {
        let client = HttpClient::new(&ScraperConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn client_rejects_unprintable_user_agent() {
        let config = ScraperConfig {
            user_agent: "bad\nagent".to_string(),
            ..ScraperConfig::default()
        };
        assert!(HttpClient::new(&config).is_err());
    }
}
