//! Article and source records as returned by the upstream API.
//!
//! Every field the API may omit is optional here; the formatter substitutes
//! "N/A" so rendered output never contains missing-field artifacts. Records
//! are consumed once per call and never persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A news article from the `everything` or `top-headlines` endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    /// Publishing outlet
    pub source: ArticleSource,

    /// Article author
    pub author: Option<String>,

    /// Headline
    pub title: Option<String>,

    /// Short description or snippet
    pub description: Option<String>,

    /// Article page URL
    pub url: Option<String>,

    /// Publication timestamp (ISO-8601)
    pub published_at: Option<String>,
}

/// The outlet attribution embedded in each article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// A news outlet from the `top-headlines/sources` endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSource {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub url: Option<String>,
}

fn records_from<T: serde::de::DeserializeOwned>(data: &Value, key: &str) -> Vec<T> {
    data.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Pull the `articles` array out of a success payload.
///
/// Individually malformed entries are dropped rather than failing the call.
pub fn articles_from_payload(data: &Value) -> Vec<Article> {
    records_from(data, "articles")
}

/// Pull the `sources` array out of a success payload
pub fn sources_from_payload(data: &Value) -> Vec<NewsSource> {
    records_from(data, "sources")
}

/// The `totalResults` count from an article payload, zero when absent
pub fn total_results(data: &Value) -> u64 {
    data.get("totalResults").and_then(Value::as_u64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_tolerates_missing_and_extra_fields() {
        let json = serde_json::json!({
            "source": {"id": "bbc-news", "name": "BBC News"},
            "title": "Example headline",
            "urlToImage": "https://example.com/img.png",
            "content": "ignored"
        });

        let article: Article = serde_json::from_value(json).unwrap();
        assert_eq!(article.title.as_deref(), Some("Example headline"));
        assert_eq!(article.source.name.as_deref(), Some("BBC News"));
        assert!(article.author.is_none());
        assert!(article.published_at.is_none());
    }

    #[test]
    fn test_published_at_uses_camel_case_key() {
        let json = serde_json::json!({"publishedAt": "2024-03-01T12:30:00Z"});
        let article: Article = serde_json::from_value(json).unwrap();
        assert_eq!(
            article.published_at.as_deref(),
            Some("2024-03-01T12:30:00Z")
        );
    }

    #[test]
    fn test_news_source_deserializes_null_fields() {
        let json = serde_json::json!({"id": "wired", "name": "Wired", "country": null});
        let source: NewsSource = serde_json::from_value(json).unwrap();
        assert_eq!(source.id.as_deref(), Some("wired"));
        assert!(source.country.is_none());
    }

    #[test]
    fn test_payload_extraction_skips_malformed_entries() {
        let data = serde_json::json!({
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"title": "Good", "source": {"name": "A"}},
                "not-an-object"
            ]
        });
        let articles = articles_from_payload(&data);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title.as_deref(), Some("Good"));
        assert_eq!(total_results(&data), 2);
    }

    #[test]
    fn test_payload_extraction_defaults() {
        let data = serde_json::json!({"status": "ok"});
        assert!(articles_from_payload(&data).is_empty());
        assert!(sources_from_payload(&data).is_empty());
        assert_eq!(total_results(&data), 0);
    }
}
