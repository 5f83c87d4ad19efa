//! Error types for the scraping pipeline.
//!
//! Two tiers with different blast radii: [`ScrapeError`] aborts a whole
//! scrape and reaches the caller; [`ExtractError`] is confined to a single
//! result container, which is dropped while its siblings continue.

use thiserror::Error;

/// Fatal scraping errors. Any of these aborts the operation with no partial
/// results. The engine never retries; callers re-issue the request if they
/// want another attempt.
#[derive(Error, Debug, Clone)]
pub enum ScrapeError {
    #[error("search request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("search page fetch failed: {message}")]
    FetchError {
        /// HTTP status of the failed response, absent for transport-level
        /// failures that never produced a response.
        status: Option<u16>,
        message: String,
    },

    #[error("search page could not be parsed: {message}")]
    ParseError { message: String },
}

impl ScrapeError {
    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    /// Fetch failure for a response with a non-success status.
    pub fn fetch_status(status: u16) -> Self {
        Self::FetchError {
            status: Some(status),
            message: format!("status {status}"),
        }
    }

    /// Fetch failure that never produced a response.
    pub fn fetch_transport(reason: impl std::fmt::Display) -> Self {
        Self::FetchError {
            status: None,
            message: reason.to_string(),
        }
    }

    pub fn parse(reason: impl Into<String>) -> Self {
        Self::ParseError {
            message: reason.into(),
        }
    }
}

/// Faults raised inside a single container's extractors.
///
/// Distinct from a field simply being absent (which yields the field's
/// placeholder): these mean the extraction logic itself failed. The
/// container is dropped from the result and the fault logged, never
/// escalated to the caller.
#[derive(Error, Debug, Clone)]
pub enum ExtractError {
    #[error("could not resolve product link '{href}' against '{origin}': {reason}")]
    UrlResolution {
        href: String,
        origin: String,
        reason: String,
    },
}

impl ExtractError {
    pub fn url_resolution(href: &str, origin: &str, reason: impl std::fmt::Display) -> Self {
        Self::UrlResolution {
            href: href.to_string(),
            origin: origin.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
pub type ExtractResult<T> = Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_status_carries_the_status() {
        let err = ScrapeError::fetch_status(503);
        assert!(matches!(err, ScrapeError::FetchError { status: Some(503), .. }));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn timeout_reports_the_budget() {
        assert_eq!(
            ScrapeError::timeout(10).to_string(),
            "search request timed out after 10s"
        );
    }
}
