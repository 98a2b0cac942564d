//! Plain-text rendering of articles and sources.
//!
//! Output is a fixed-layout block per item with "N/A" standing in for any
//! field the upstream omitted. Rendering is total: a malformed timestamp is
//! printed verbatim rather than failing, so formatting can never abort a
//! result.

use chrono::{DateTime, Utc};

use crate::models::{Article, NewsSource};

/// Default number of items rendered before the "... and N more" summary
pub const DISPLAY_LIMIT: usize = 5;

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "N/A",
    }
}

/// Reformat an ISO-8601 timestamp to "YYYY-MM-DD HH:MM UTC".
///
/// Unparseable input is returned verbatim; a missing timestamp renders as
/// "Unknown date".
fn format_published(published_at: Option<&str>) -> String {
    match published_at {
        Some(raw) if !raw.is_empty() => match DateTime::parse_from_rfc3339(raw) {
            Ok(parsed) => parsed
                .with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M UTC")
                .to_string(),
            Err(_) => raw.to_string(),
        },
        _ => "Unknown date".to_string(),
    }
}

/// Format a single article into a labeled multi-line block
pub fn format_article(article: &Article) -> String {
    format!(
        "Title: {}\n\
         Source: {}\n\
         Author: {}\n\
         Published: {}\n\
         Description: {}\n\
         URL: {}\n\
         ---\n",
        or_na(article.title.as_deref()),
        or_na(article.source.name.as_deref()),
        or_na(article.author.as_deref()),
        format_published(article.published_at.as_deref()),
        or_na(article.description.as_deref()),
        or_na(article.url.as_deref()),
    )
}

/// Format up to `limit` articles with 1-based ordinal headers
pub fn format_articles(articles: &[Article], limit: usize) -> String {
    if articles.is_empty() {
        return "No articles found.".to_string();
    }

    let mut formatted: Vec<String> = articles
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, article)| format!("Article {}:\n{}", i + 1, format_article(article)))
        .collect();

    if articles.len() > limit {
        formatted.push(format!(
            "\n... and {} more articles",
            articles.len() - limit
        ));
    }

    formatted.join("\n")
}

/// Format a single news source into a labeled multi-line block
pub fn format_source(source: &NewsSource) -> String {
    format!(
        "Name: {}\n\
         ID: {}\n\
         Description: {}\n\
         Category: {}\n\
         Language: {}\n\
         Country: {}\n\
         URL: {}\n\
         ---\n",
        or_na(source.name.as_deref()),
        or_na(source.id.as_deref()),
        or_na(source.description.as_deref()),
        or_na(source.category.as_deref()),
        or_na(source.language.as_deref()),
        or_na(source.country.as_deref()),
        or_na(source.url.as_deref()),
    )
}

/// Format up to `limit` sources with 1-based ordinal headers
pub fn format_sources(sources: &[NewsSource], limit: usize) -> String {
    if sources.is_empty() {
        return "No sources found.".to_string();
    }

    let mut formatted: Vec<String> = sources
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, source)| format!("Source {}:\n{}", i + 1, format_source(source)))
        .collect();

    if sources.len() > limit {
        formatted.push(format!("\n... and {} more sources", sources.len() - limit));
    }

    formatted.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleSource;

    fn article(title: &str) -> Article {
        Article {
            source: ArticleSource {
                id: Some("bbc-news".to_string()),
                name: Some("BBC News".to_string()),
            },
            author: Some("Jo Bloggs".to_string()),
            title: Some(title.to_string()),
            description: Some("A description".to_string()),
            url: Some("https://example.com/story".to_string()),
            published_at: Some("2024-03-01T12:30:00Z".to_string()),
        }
    }

    #[test]
    fn test_format_article_field_order() {
        let text = format_article(&article("Headline"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Title: Headline");
        assert_eq!(lines[1], "Source: BBC News");
        assert_eq!(lines[2], "Author: Jo Bloggs");
        assert_eq!(lines[3], "Published: 2024-03-01 12:30 UTC");
        assert_eq!(lines[4], "Description: A description");
        assert_eq!(lines[5], "URL: https://example.com/story");
        assert_eq!(lines[6], "---");
    }

    #[test]
    fn test_missing_fields_render_as_na() {
        let text = format_article(&Article::default());
        assert!(text.contains("Title: N/A"));
        assert!(text.contains("Source: N/A"));
        assert!(text.contains("Author: N/A"));
        assert!(text.contains("Published: Unknown date"));
        assert!(text.contains("Description: N/A"));
        assert!(text.contains("URL: N/A"));
    }

    #[test]
    fn test_unparseable_date_is_verbatim() {
        let mut item = article("x");
        item.published_at = Some("not-a-date".to_string());
        assert!(format_article(&item).contains("Published: not-a-date"));
    }

    #[test]
    fn test_offset_timestamp_normalized_to_utc() {
        let mut item = article("x");
        item.published_at = Some("2024-03-01T14:30:00+02:00".to_string());
        assert!(format_article(&item).contains("Published: 2024-03-01 12:30 UTC"));
    }

    #[test]
    fn test_empty_list_sentinels() {
        assert_eq!(format_articles(&[], DISPLAY_LIMIT), "No articles found.");
        assert_eq!(format_sources(&[], DISPLAY_LIMIT), "No sources found.");
    }

    #[test]
    fn test_limit_and_omitted_summary() {
        let articles: Vec<Article> = (0..7).map(|i| article(&format!("A{}", i))).collect();
        let text = format_articles(&articles, 5);

        assert_eq!(text.matches("Title: ").count(), 5);
        assert!(text.contains("Article 1:"));
        assert!(text.contains("Article 5:"));
        assert!(!text.contains("Article 6:"));
        assert!(text.ends_with("\n... and 2 more articles"));
    }

    #[test]
    fn test_no_summary_when_under_limit() {
        let articles: Vec<Article> = (0..3).map(|i| article(&format!("A{}", i))).collect();
        let text = format_articles(&articles, 5);
        assert!(!text.contains("more articles"));
    }

    #[test]
    fn test_source_block_field_order() {
        let source = NewsSource {
            id: Some("wired".to_string()),
            name: Some("Wired".to_string()),
            description: Some("Tech news".to_string()),
            category: Some("technology".to_string()),
            language: Some("en".to_string()),
            country: Some("us".to_string()),
            url: Some("https://www.wired.com".to_string()),
        };
        let text = format_source(&source);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name: Wired");
        assert_eq!(lines[1], "ID: wired");
        assert_eq!(lines[2], "Description: Tech news");
        assert_eq!(lines[3], "Category: technology");
        assert_eq!(lines[4], "Language: en");
        assert_eq!(lines[5], "Country: us");
        assert_eq!(lines[6], "URL: https://www.wired.com");
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let articles: Vec<Article> = (0..7).map(|i| article(&format!("A{}", i))).collect();
        let first = format_articles(&articles, 5);
        let second = format_articles(&articles, 5);
        assert_eq!(first, second);
    }
}
