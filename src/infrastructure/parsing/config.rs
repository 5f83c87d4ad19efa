//! Selector configuration for search result extraction.
//!
//! Every field carries an ordered chain of CSS selectors tried first-match;
//! the marketplace reshuffles its markup often enough that each field needs
//! at least one fallback.

use serde::{Deserialize, Serialize};

/// Ordered CSS selector chains for one search results page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorChains {
    /// Containers representing one product each.
    pub result_container: Vec<String>,

    /// Elements carrying the product title text.
    pub title: Vec<String>,

    /// Heading link carrying the product href.
    pub product_link: Vec<String>,

    /// Elements carrying the star rating (label or icon).
    pub rating: Vec<String>,

    /// Elements carrying the customer review count.
    pub review_count: Vec<String>,

    /// Product image elements.
    pub image: Vec<String>,

    /// Price elements, offscreen accessibility text first.
    pub price: Vec<String>,
}

impl Default for SelectorChains {
    fn default() -> Self {
        Self {
            result_container: vec!["div[data-component-type='s-search-result']".to_string()],
            title: vec!["h2 a span".to_string(), "h2 a".to_string()],
            product_link: vec!["h2 a".to_string()],
            rating: vec![
                "span[aria-label*='stars']".to_string(),
                "i[class*='a-icon-star']".to_string(),
            ],
            review_count: vec![
                "span[aria-label*='stars'] + span".to_string(),
                "a[href*='customerReviews']".to_string(),
            ],
            image: vec![
                "img[data-image-latency='s-product-image']".to_string(),
                "img[class*='s-image']".to_string(),
            ],
            price: vec![
                "span.a-price span.a-offscreen".to_string(),
                "span.a-price".to_string(),
            ],
        }
    }
}
