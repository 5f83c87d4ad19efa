use serde::{Serialize, Serializer};

/// Placeholder title for a result card with no readable heading.
pub const TITLE_NOT_FOUND: &str = "Title not found";

/// Placeholder price for a result card with no price element.
pub const PRICE_NOT_AVAILABLE: &str = "Price not available";

/// Placeholder emitted on the wire for a missing rating.
pub const NO_RATING: &str = "No rating";

/// Placeholder emitted on the wire for a missing review count.
pub const NO_REVIEWS: &str = "No reviews";

/// Star rating extracted from a result card.
///
/// Serializes as the bare number when present and as the [`NO_RATING`]
/// placeholder string when absent, so consumers see either `4.5` or
/// `"No rating"`. The extracted value is taken as-is; the nominal 0-5 range
/// is not enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Stars(f64),
    Missing,
}

impl Serialize for Rating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Stars(value) => serializer.serialize_f64(*value),
            Self::Missing => serializer.serialize_str(NO_RATING),
        }
    }
}

/// Number of customer reviews extracted from a result card.
///
/// Serializes as the bare integer when present and as the [`NO_REVIEWS`]
/// placeholder string when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewCount {
    Count(u64),
    Missing,
}

impl Serialize for ReviewCount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Count(value) => serializer.serialize_u64(*value),
            Self::Missing => serializer.serialize_str(NO_REVIEWS),
        }
    }
}

/// One product extracted from a search results page.
///
/// Immutable once built. `position` is the 1-based rank of the source
/// container in document order, assigned before any container is dropped,
/// so a dropped container leaves a gap rather than renumbering the rest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub title: String,
    pub rating: Rating,
    pub review_count: ReviewCount,
    pub image_url: String,
    pub price: String,
    pub product_url: String,
    pub position: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> ProductRecord {
        ProductRecord {
            title: "Wireless Mouse".to_string(),
            rating: Rating::Stars(4.5),
            review_count: ReviewCount::Count(12345),
            image_url: "https://images.example.com/mouse.jpg".to_string(),
            price: "$24.99".to_string(),
            product_url: "https://www.amazon.com/dp/B000".to_string(),
            position: 1,
        }
    }

    #[test]
    fn present_fields_serialize_as_numbers() {
        let value = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(value["rating"], json!(4.5));
        assert_eq!(value["reviewCount"], json!(12345));
    }

    #[test]
    fn missing_fields_serialize_as_placeholders() {
        let record = ProductRecord {
            rating: Rating::Missing,
            review_count: ReviewCount::Missing,
            ..sample_record()
        };
        let value = serde_json::to_value(record).unwrap();
        assert_eq!(value["rating"], json!(NO_RATING));
        assert_eq!(value["reviewCount"], json!(NO_REVIEWS));
    }

    #[test]
    fn wire_names_are_camel_case() {
        let value = serde_json::to_value(sample_record()).unwrap();
        for key in ["title", "rating", "reviewCount", "imageUrl", "price", "productUrl", "position"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }
}
