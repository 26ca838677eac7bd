//! Data models for listing candidates and scraped articles.
//!
//! - [`ListingCandidate`]: an article link discovered on the listing page
//! - [`ArticleRecord`]: one extracted article as stored in the corpus
//!
//! The corpus itself is a plain `Vec<ArticleRecord>` in discovery order.

use serde::{Deserialize, Serialize};

/// An article link discovered on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCandidate {
    /// Absolute article URL.
    pub url: String,
    /// The anchor text shown on the listing page.
    pub title: String,
}

/// A scraped article as persisted in the corpus file.
///
/// `url` is the natural key: no two records in a corpus share it. Field
/// order here is the field order in the JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// The article headline, or `"Unknown headline"`.
    pub headline: String,
    /// The article category, or `"Unknown Category"`.
    pub category: String,
    /// Body paragraphs joined by single spaces. May be empty.
    pub full_text: String,
    /// The URL the article was fetched from.
    pub url: String,
    /// Extraction time, `YYYY-MM-DDTHH:MM:SSZ` in UTC.
    pub scraped_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ArticleRecord {
        ArticleRecord {
            headline: "Oil climbs".to_string(),
            category: "Commodities".to_string(),
            full_text: "Crude futures rose on Tuesday.".to_string(),
            url: "https://www.investing.com/news/commodities-news/oil-climbs-1".to_string(),
            scraped_at: "2025-05-06T08:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_record_serialization_field_names() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"headline":"Oil climbs","category":"Commodities","full_text":"Crude futures rose on Tuesday.","url":"https://www.investing.com/news/commodities-news/oil-climbs-1","scraped_at":"2025-05-06T08:00:00Z"}"#
        );
    }

    #[test]
    fn test_record_deserialization() {
        let json = r#"{
            "headline": "Dólar sube",
            "category": "Economy",
            "full_text": "",
            "url": "https://www.investing.com/news/economy-news/dolar-2",
            "scraped_at": "2025-05-06T09:15:30Z"
        }"#;

        let record: ArticleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.headline, "Dólar sube");
        assert_eq!(record.category, "Economy");
        assert!(record.full_text.is_empty());
    }

    #[test]
    fn test_record_missing_field_is_rejected() {
        let json = r#"{"headline": "x", "category": "y", "url": "z"}"#;
        assert!(serde_json::from_str::<ArticleRecord>(json).is_err());
    }
}
