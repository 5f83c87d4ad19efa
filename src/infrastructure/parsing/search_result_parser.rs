//! Field extraction from marketplace search result pages.
//!
//! Each record field has its own ordered fallback chain and its own default,
//! so a field the markup dropped yields its placeholder without disturbing
//! its neighbors, and a fault inside one container drops only that container.

use anyhow::{Context, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::domain::product::{
    PRICE_NOT_AVAILABLE, ProductRecord, Rating, ReviewCount, TITLE_NOT_FOUND,
};
use crate::infrastructure::parsing::config::SelectorChains;
use crate::infrastructure::scrape_error::{ExtractError, ExtractResult};

/// Parser for marketplace search result pages.
///
/// Selector chains and numeric patterns are compiled once at construction;
/// parsing itself is a pure traversal of an immutable document tree, so one
/// parser value can serve any number of pages.
pub struct SearchResultParser {
    base_origin: String,
    container_selectors: Vec<Selector>,
    title_selectors: Vec<Selector>,
    link_selectors: Vec<Selector>,
    rating_selectors: Vec<Selector>,
    review_selectors: Vec<Selector>,
    image_selectors: Vec<Selector>,
    price_selectors: Vec<Selector>,
    decimal_pattern: Regex,
    digit_group_pattern: Regex,
}

impl SearchResultParser {
    /// Create a parser with the default marketplace selector chains.
    pub fn new(base_origin: &str) -> Result<Self> {
        Self::with_chains(base_origin, &SelectorChains::default())
    }

    /// Create a parser with custom selector chains.
    pub fn with_chains(base_origin: &str, chains: &SelectorChains) -> Result<Self> {
        Ok(Self {
            base_origin: base_origin.trim_end_matches('/').to_string(),
            container_selectors: compile_selectors(&chains.result_container)?,
            title_selectors: compile_selectors(&chains.title)?,
            link_selectors: compile_selectors(&chains.product_link)?,
            rating_selectors: compile_selectors(&chains.rating)?,
            review_selectors: compile_selectors(&chains.review_count)?,
            image_selectors: compile_selectors(&chains.image)?,
            price_selectors: compile_selectors(&chains.price)?,
            decimal_pattern: Regex::new(r"(\d+(?:\.\d+)?)")
                .context("failed to compile decimal pattern")?,
            digit_group_pattern: Regex::new(r"(\d[\d,]*)")
                .context("failed to compile digit group pattern")?,
        })
    }

    /// Extract every product record from a parsed search page.
    ///
    /// Containers are ranked 1-based in document order before any filtering,
    /// so a container dropped by an extraction fault leaves a gap in the
    /// `position` sequence instead of renumbering its successors. Zero
    /// containers is a valid outcome: an empty page and a reshuffled page
    /// look the same from here, and both produce an empty list.
    pub fn parse_records(&self, html: &Html) -> Vec<ProductRecord> {
        let containers = self.select_containers(html);
        debug!("found {} result containers", containers.len());

        let mut records = Vec::with_capacity(containers.len());
        for (index, container) in containers.into_iter().enumerate() {
            let position = (index + 1) as u32;
            match self.extract_record(container, position) {
                Ok(record) => records.push(record),
                Err(e) => {
                    // Container-level fault: drop this one, keep the rest.
                    warn!("dropping result container #{position}: {e}");
                }
            }
        }
        records
    }

    fn select_containers<'a>(&self, html: &'a Html) -> Vec<ElementRef<'a>> {
        for selector in &self.container_selectors {
            let found: Vec<ElementRef<'a>> = html.select(selector).collect();
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }

    /// Extract a single record from one result container.
    ///
    /// A missing field falls back to its placeholder and leaves the other
    /// fields untouched; only an internal extractor fault aborts the
    /// container as a whole.
    fn extract_record(
        &self,
        container: ElementRef<'_>,
        position: u32,
    ) -> ExtractResult<ProductRecord> {
        let title = self
            .first_text(container, &self.title_selectors)
            .unwrap_or_else(|| TITLE_NOT_FOUND.to_string());

        let product_url = match self.first_attr(container, &self.link_selectors, "href") {
            Some(href) => self.resolve_product_url(&href)?,
            None => String::new(),
        };

        let rating = self.extract_rating(container);
        let review_count = self.extract_review_count(container);

        let image_url = self
            .first_attr(container, &self.image_selectors, "src")
            .unwrap_or_default();

        let price = self
            .first_text(container, &self.price_selectors)
            .unwrap_or_else(|| PRICE_NOT_AVAILABLE.to_string());

        Ok(ProductRecord {
            title,
            rating,
            review_count,
            image_url,
            price,
            product_url,
            position,
        })
    }

    /// Rating comes from the accessibility label when present, otherwise the
    /// element text, e.g. "4.5 out of 5 stars". The first decimal number in
    /// that text wins and is taken as-is, not clamped to the nominal 0-5
    /// range.
    fn extract_rating(&self, container: ElementRef<'_>) -> Rating {
        let Some(element) = first_match(container, &self.rating_selectors) else {
            return Rating::Missing;
        };

        let label = element
            .value()
            .attr("aria-label")
            .filter(|v| !v.is_empty())
            .map_or_else(|| element_text(element), str::to_string);

        self.decimal_pattern
            .captures(&label)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map_or(Rating::Missing, Rating::Stars)
    }

    /// Review counts arrive as display text with thousands separators, e.g.
    /// "12,345 ratings". The first digit group is stripped of separators and
    /// parsed; failure at any step yields the placeholder.
    fn extract_review_count(&self, container: ElementRef<'_>) -> ReviewCount {
        let Some(element) = first_match(container, &self.review_selectors) else {
            return ReviewCount::Missing;
        };

        let text = element_text(element);
        self.digit_group_pattern
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().replace(',', "").parse::<u64>().ok())
            .map_or(ReviewCount::Missing, ReviewCount::Count)
    }

    /// Product links on result pages are origin-relative; resolve them into
    /// absolute URLs. A failure here is an internal fault rather than a
    /// missing field, so it surfaces as an [`ExtractError`] and drops the
    /// container.
    fn resolve_product_url(&self, href: &str) -> ExtractResult<String> {
        if href.starts_with("http") {
            return Ok(href.to_string());
        }

        let origin = Url::parse(&self.base_origin)
            .map_err(|e| ExtractError::url_resolution(href, &self.base_origin, e))?;
        let resolved = origin
            .join(href)
            .map_err(|e| ExtractError::url_resolution(href, &self.base_origin, e))?;

        Ok(resolved.to_string())
    }

    /// First non-empty trimmed text reachable through a selector chain.
    fn first_text(&self, element: ElementRef<'_>, selectors: &[Selector]) -> Option<String> {
        selectors
            .iter()
            .filter_map(|selector| element.select(selector).next())
            .map(|found| element_text(found).trim().to_string())
            .find(|text| !text.is_empty())
    }

    /// Attribute of the first element a selector chain yields. The lookup is
    /// element-first: once a chain entry matches, later entries are not
    /// consulted even if the matched element lacks the attribute.
    fn first_attr(
        &self,
        element: ElementRef<'_>,
        selectors: &[Selector],
        attr: &str,
    ) -> Option<String> {
        first_match(element, selectors)
            .and_then(|found| found.value().attr(attr))
            .map(str::to_string)
    }
}

/// First element any selector in the chain matches, in chain order.
fn first_match<'a>(element: ElementRef<'a>, selectors: &[Selector]) -> Option<ElementRef<'a>> {
    selectors
        .iter()
        .find_map(|selector| element.select(selector).next())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Compile a selector chain, skipping entries that fail to parse.
///
/// An invalid entry is logged and skipped; the chain only errors when no
/// entry at all survives.
fn compile_selectors(chain: &[String]) -> Result<Vec<Selector>> {
    let mut selectors = Vec::with_capacity(chain.len());
    let mut failures = Vec::new();

    for raw in chain {
        match Selector::parse(raw) {
            Ok(selector) => selectors.push(selector),
            Err(e) => {
                warn!("skipping invalid selector '{raw}': {e}");
                failures.push(format!("'{raw}': {e}"));
            }
        }
    }

    if selectors.is_empty() {
        anyhow::bail!("no valid selectors in chain: {}", failures.join(", "));
    }

    Ok(selectors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ORIGIN: &str = "https://www.amazon.com";

    fn parser() -> SearchResultParser {
        SearchResultParser::new(ORIGIN).unwrap()
    }

    fn parse(html: &str) -> Vec<ProductRecord> {
        parser().parse_records(&Html::parse_document(html))
    }

    fn full_card(href: &str, title: &str) -> String {
        format!(
            r#"<div data-component-type="s-search-result">
                 <h2><a href="{href}"><span>{title}</span></a></h2>
                 <span aria-label="4.5 out of 5 stars"><span class="a-icon-alt">4.5 out of 5 stars</span></span>
                 <span aria-label="12,345"><span class="a-size-base">12,345 ratings</span></span>
                 <img data-image-latency="s-product-image" class="s-image" src="https://img.example.com/p.jpg">
                 <span class="a-price"><span class="a-offscreen">$24.99</span><span aria-hidden="true">$24.99</span></span>
               </div>"#
        )
    }

    #[test]
    fn extracts_all_fields_from_a_complete_card() {
        let records = parse(&full_card("/dp/B0TEST", "Wireless Mouse Pro"));
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.title, "Wireless Mouse Pro");
        assert_eq!(record.rating, Rating::Stars(4.5));
        assert_eq!(record.review_count, ReviewCount::Count(12345));
        assert_eq!(record.image_url, "https://img.example.com/p.jpg");
        assert_eq!(record.price, "$24.99");
        assert_eq!(record.product_url, "https://www.amazon.com/dp/B0TEST");
        assert_eq!(record.position, 1);
    }

    #[test]
    fn page_without_containers_yields_empty_list() {
        let records = parse("<html><body><div class='unrelated'>nothing here</div></body></html>");
        assert!(records.is_empty());
    }

    #[test]
    fn missing_rating_leaves_other_fields_intact() {
        let html = r#"<div data-component-type="s-search-result">
                        <h2><a href="/dp/B1"><span>Bare Mouse</span></a></h2>
                        <span class="a-price"><span class="a-offscreen">$9.99</span></span>
                      </div>"#;
        let records = parse(html);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.rating, Rating::Missing);
        assert_eq!(record.review_count, ReviewCount::Missing);
        assert_eq!(record.title, "Bare Mouse");
        assert_eq!(record.price, "$9.99");
        assert_eq!(record.product_url, "https://www.amazon.com/dp/B1");
    }

    #[test]
    fn card_without_heading_gets_title_placeholder() {
        let html = r#"<div data-component-type="s-search-result">
                        <span class="a-price"><span class="a-offscreen">$5.00</span></span>
                      </div>"#;
        let records = parse(html);
        assert_eq!(records[0].title, TITLE_NOT_FOUND);
        assert_eq!(records[0].product_url, "");
    }

    #[test]
    fn title_falls_back_to_link_text_when_span_is_absent() {
        let html = r#"<div data-component-type="s-search-result">
                        <h2><a href="/dp/B2">Plain Link Title</a></h2>
                      </div>"#;
        let records = parse(html);
        assert_eq!(records[0].title, "Plain Link Title");
    }

    #[test]
    fn rating_falls_back_to_star_icon_text() {
        let html = r#"<div data-component-type="s-search-result">
                        <h2><a href="/dp/B3"><span>Iconic</span></a></h2>
                        <i class="a-icon a-icon-star-small"><span class="a-icon-alt">3.8 out of 5 stars</span></i>
                      </div>"#;
        let records = parse(html);
        assert_eq!(records[0].rating, Rating::Stars(3.8));
    }

    #[test]
    fn review_count_falls_back_to_customer_reviews_link() {
        let html = r##"<div data-component-type="s-search-result">
                         <h2><a href="/dp/B4"><span>Linked</span></a></h2>
                         <a href="/dp/B4#customerReviews">2,041</a>
                       </div>"##;
        let records = parse(html);
        assert_eq!(records[0].review_count, ReviewCount::Count(2041));
    }

    #[test]
    fn price_falls_back_to_price_container_text() {
        let html = r#"<div data-component-type="s-search-result">
                        <h2><a href="/dp/B5"><span>Priced</span></a></h2>
                        <span class="a-price">$13.37</span>
                      </div>"#;
        let records = parse(html);
        assert_eq!(records[0].price, "$13.37");
    }

    #[test]
    fn card_without_image_gets_empty_image_url() {
        let html = r#"<div data-component-type="s-search-result">
                        <h2><a href="/dp/B6"><span>Pictureless</span></a></h2>
                      </div>"#;
        let records = parse(html);
        assert_eq!(records[0].image_url, "");
    }

    #[test]
    fn positions_follow_document_order() {
        let html = format!(
            "{}{}{}",
            full_card("/dp/A", "First"),
            full_card("/dp/B", "Second"),
            full_card("/dp/C", "Third"),
        );
        let records = parse(&html);
        let positions: Vec<u32> = records.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn faulting_container_is_dropped_and_leaves_a_position_gap() {
        // A cannot-be-a-base origin makes relative-link resolution fault,
        // while absolute links pass through untouched. Only the middle card
        // carries a relative link, so only it is dropped.
        let parser = SearchResultParser::new("mailto:ops@example.com").unwrap();
        let html = format!(
            "{}{}{}",
            full_card("https://shop.example.com/dp/A", "Survivor One"),
            full_card("/dp/B", "Casualty"),
            full_card("https://shop.example.com/dp/C", "Survivor Two"),
        );

        let records = parser.parse_records(&Html::parse_document(&html));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Survivor One");
        assert_eq!(records[1].title, "Survivor Two");
        let positions: Vec<u32> = records.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 3]);
        // Survivors keep every field despite their dropped sibling.
        assert_eq!(records[0].rating, Rating::Stars(4.5));
        assert_eq!(records[1].review_count, ReviewCount::Count(12345));
    }

    #[rstest]
    #[case("4.5 out of 5 stars", Rating::Stars(4.5))]
    #[case("4 out of 5 stars", Rating::Stars(4.0))]
    #[case("6.3 out of 5 stars", Rating::Stars(6.3))]
    #[case("no numbers here", Rating::Missing)]
    fn rating_label_extraction(#[case] label: &str, #[case] expected: Rating) {
        let html = format!(
            r#"<div data-component-type="s-search-result">
                 <span aria-label="{label} stars"><span>{label}</span></span>
               </div>"#
        );
        let records = parse(&html);
        assert_eq!(records[0].rating, expected);
    }

    #[rstest]
    #[case("12,345 ratings", ReviewCount::Count(12345))]
    #[case("7 ratings", ReviewCount::Count(7))]
    #[case("1,234,567", ReviewCount::Count(1_234_567))]
    #[case("no reviews yet", ReviewCount::Missing)]
    fn review_count_extraction(#[case] text: &str, #[case] expected: ReviewCount) {
        let html = format!(
            r#"<div data-component-type="s-search-result">
                 <span aria-label="4.0 out of 5 stars">stars</span><span>{text}</span>
               </div>"#
        );
        let records = parse(&html);
        assert_eq!(records[0].review_count, expected);
    }

    #[test]
    fn rating_prefers_aria_label_over_element_text() {
        let html = r#"<div data-component-type="s-search-result">
                        <span aria-label="4.2 out of 5 stars"><span>unrelated 9.9 text</span></span>
                      </div>"#;
        let records = parse(html);
        assert_eq!(records[0].rating, Rating::Stars(4.2));
    }

    #[test]
    fn invalid_chain_entries_are_skipped_not_fatal() {
        let chains = SelectorChains {
            title: vec!["h2 a span".to_string(), ":::garbage".to_string()],
            ..SelectorChains::default()
        };
        assert!(SearchResultParser::with_chains(ORIGIN, &chains).is_ok());
    }

    #[test]
    fn fully_invalid_chain_is_rejected() {
        let chains = SelectorChains {
            title: vec![":::garbage".to_string()],
            ..SelectorChains::default()
        };
        assert!(SearchResultParser::with_chains(ORIGIN, &chains).is_err());
    }
}
