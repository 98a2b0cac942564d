//! Validated tool request types.
//!
//! Each MCP tool deserializes its arguments into one of these structs and
//! validates it before anything touches the network. Unknown fields are
//! rejected at deserialization time; enum membership, numeric bounds and
//! date shapes are checked by `validate()`. The `to_params()` methods own
//! the fixed local-name to upstream-name mapping (`query` -> `q`,
//! `from_date` -> `from`, `sort_by` -> `sortBy`, and so on).

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

/// Languages accepted by the upstream API
pub const LANGUAGES: &[&str] = &[
    "ar", "de", "en", "es", "fr", "he", "it", "nl", "no", "pt", "ru", "sv", "ud", "zh",
];

/// Headline/source categories accepted by the upstream API
pub const CATEGORIES: &[&str] = &[
    "business",
    "entertainment",
    "general",
    "health",
    "science",
    "sports",
    "technology",
];

/// 2-letter ISO 3166-1 country codes accepted by the upstream API
pub const COUNTRIES: &[&str] = &[
    "ae", "ar", "at", "au", "be", "bg", "br", "ca", "ch", "cn", "co", "cu", "cz", "de", "eg",
    "fr", "gb", "gr", "hk", "hu", "id", "ie", "il", "in", "it", "jp", "kr", "lt", "lv", "ma",
    "mx", "my", "ng", "nl", "no", "nz", "ph", "pl", "pt", "ro", "rs", "ru", "sa", "se", "sg",
    "si", "sk", "th", "tr", "tw", "ua", "us", "ve", "za",
];

/// Sort fields accepted by the `everything` endpoint
pub const SORT_FIELDS: &[&str] = &["relevancy", "popularity", "publishedAt"];

/// Argument validation errors, produced before any network call
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing {0} parameter")]
    MissingField(&'static str),

    #[error("Invalid value '{value}' for {field}; expected one of: {allowed}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        allowed: String,
    },

    #[error("Invalid {field} '{value}'; expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("page_size must be between 1 and 100")]
    PageSizeOutOfRange,

    #[error("page must be at least 1")]
    PageOutOfRange,

    #[error("You must specify at least one of: country, category, sources, or query")]
    NoHeadlineFilter,
}

fn check_choice(
    field: &'static str,
    value: Option<&str>,
    allowed: &[&str],
) -> Result<(), ValidationError> {
    match value {
        Some(v) if !allowed.contains(&v) => Err(ValidationError::InvalidChoice {
            field,
            value: v.to_string(),
            allowed: allowed.join(", "),
        }),
        _ => Ok(()),
    }
}

fn check_date(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    match value {
        Some(v) if NaiveDate::parse_from_str(v, "%Y-%m-%d").is_err() => {
            Err(ValidationError::InvalidDate {
                field,
                value: v.to_string(),
            })
        }
        _ => Ok(()),
    }
}

/// Append an optional filter, skipping absent or empty values so they are
/// never forwarded upstream as empty query parameters
fn push_filter(
    params: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: &Option<String>,
) {
    if let Some(v) = value {
        if !v.is_empty() {
            params.push((key, v.clone()));
        }
    }
}

fn check_paging(page_size: Option<u32>, page: Option<u32>) -> Result<(), ValidationError> {
    if let Some(size) = page_size {
        if !(1..=100).contains(&size) {
            return Err(ValidationError::PageSizeOutOfRange);
        }
    }
    if page == Some(0) {
        return Err(ValidationError::PageOutOfRange);
    }
    Ok(())
}

/// Arguments for the `search-news` tool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchNewsRequest {
    pub query: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub sources: Option<String>,
    pub language: Option<String>,
    pub sort_by: Option<String>,
    pub page_size: Option<u32>,
    pub page: Option<u32>,
}

impl SearchNewsRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.query.as_deref().map_or(true, str::is_empty) {
            return Err(ValidationError::MissingField("query"));
        }
        check_date("from_date", self.from_date.as_deref())?;
        check_date("to_date", self.to_date.as_deref())?;
        check_choice("language", self.language.as_deref(), LANGUAGES)?;
        check_choice("sort_by", self.sort_by.as_deref(), SORT_FIELDS)?;
        check_paging(self.page_size, self.page)
    }

    /// The validated query string
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }

    /// Upstream query parameters for the `everything` endpoint
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.query().to_string()),
            ("pageSize", self.page_size.unwrap_or(20).to_string()),
            ("page", self.page.unwrap_or(1).to_string()),
            ("language", self.language.clone().unwrap_or_else(|| "en".to_string())),
            (
                "sortBy",
                self.sort_by.clone().unwrap_or_else(|| "publishedAt".to_string()),
            ),
        ];
        push_filter(&mut params, "from", &self.from_date);
        push_filter(&mut params, "to", &self.to_date);
        push_filter(&mut params, "sources", &self.sources);
        params
    }
}

/// Arguments for the `get-top-headlines` tool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopHeadlinesRequest {
    pub country: Option<String>,
    pub category: Option<String>,
    pub sources: Option<String>,
    pub query: Option<String>,
    pub page_size: Option<u32>,
    pub page: Option<u32>,
}

impl TopHeadlinesRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.country.is_none()
            && self.category.is_none()
            && self.sources.is_none()
            && self.query.is_none()
        {
            return Err(ValidationError::NoHeadlineFilter);
        }
        check_choice("country", self.country.as_deref(), COUNTRIES)?;
        check_choice("category", self.category.as_deref(), CATEGORIES)?;
        check_paging(self.page_size, self.page)
    }

    /// Upstream query parameters for the `top-headlines` endpoint
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("pageSize", self.page_size.unwrap_or(20).to_string()),
            ("page", self.page.unwrap_or(1).to_string()),
        ];
        push_filter(&mut params, "country", &self.country);
        push_filter(&mut params, "category", &self.category);
        push_filter(&mut params, "sources", &self.sources);
        // The API uses 'q' instead of 'query'
        push_filter(&mut params, "q", &self.query);
        params
    }

    /// Contextual title naming the filters applied to this request
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(country) = &self.country {
            parts.push(format!("country: {}", country.to_uppercase()));
        }
        if let Some(category) = &self.category {
            parts.push(format!("category: {}", category));
        }
        if let Some(sources) = &self.sources {
            parts.push(format!("sources: {}", sources));
        }
        if let Some(query) = &self.query {
            parts.push(format!("query: '{}'", query));
        }

        if parts.is_empty() {
            "Top headlines".to_string()
        } else {
            format!("Top headlines for {}", parts.join(", "))
        }
    }
}

/// Arguments for the `get-news-sources` tool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewsSourcesRequest {
    pub category: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

impl NewsSourcesRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_choice("category", self.category.as_deref(), CATEGORIES)?;
        check_choice("language", self.language.as_deref(), LANGUAGES)?;
        check_choice("country", self.country.as_deref(), COUNTRIES)
    }

    /// Upstream query parameters for the `top-headlines/sources` endpoint
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_filter(&mut params, "category", &self.category);
        push_filter(&mut params, "language", &self.language);
        push_filter(&mut params, "country", &self.country);
        params
    }

    /// Contextual title naming the filters applied to this request
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(category) = &self.category {
            parts.push(format!("category: {}", category));
        }
        if let Some(language) = &self.language {
            parts.push(format!("language: {}", language));
        }
        if let Some(country) = &self.country {
            parts.push(format!("country: {}", country.to_uppercase()));
        }

        if parts.is_empty() {
            "Available news sources".to_string()
        } else {
            format!("Available news sources for {}", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_search_requires_query() {
        let request = SearchNewsRequest::default();
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingField("query"))
        );
    }

    #[test]
    fn test_search_param_mapping() {
        let request = SearchNewsRequest {
            query: Some("rust language".to_string()),
            from_date: Some("2024-01-01".to_string()),
            to_date: Some("2024-02-01".to_string()),
            sources: Some("bbc-news,cnn".to_string()),
            sort_by: Some("popularity".to_string()),
            page_size: Some(50),
            page: Some(2),
            language: None,
        };
        assert_eq!(request.validate(), Ok(()));

        let params = request.to_params();
        assert_eq!(param(&params, "q"), Some("rust language"));
        assert_eq!(param(&params, "from"), Some("2024-01-01"));
        assert_eq!(param(&params, "to"), Some("2024-02-01"));
        assert_eq!(param(&params, "sources"), Some("bbc-news,cnn"));
        assert_eq!(param(&params, "sortBy"), Some("popularity"));
        assert_eq!(param(&params, "pageSize"), Some("50"));
        assert_eq!(param(&params, "page"), Some("2"));
        // no local names leak through
        assert_eq!(param(&params, "query"), None);
        assert_eq!(param(&params, "sort_by"), None);
        assert_eq!(param(&params, "from_date"), None);
    }

    #[test]
    fn test_search_defaults() {
        let request = SearchNewsRequest {
            query: Some("bitcoin".to_string()),
            ..Default::default()
        };
        let params = request.to_params();
        assert_eq!(param(&params, "pageSize"), Some("20"));
        assert_eq!(param(&params, "page"), Some("1"));
        assert_eq!(param(&params, "language"), Some("en"));
        assert_eq!(param(&params, "sortBy"), Some("publishedAt"));
        assert_eq!(param(&params, "from"), None);
    }

    #[test]
    fn test_search_rejects_bad_values() {
        let mut request = SearchNewsRequest {
            query: Some("ok".to_string()),
            language: Some("xx".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            request.validate(),
            Err(ValidationError::InvalidChoice { field: "language", .. })
        ));

        request.language = None;
        request.sort_by = Some("newest".to_string());
        assert!(matches!(
            request.validate(),
            Err(ValidationError::InvalidChoice { field: "sort_by", .. })
        ));

        request.sort_by = None;
        request.page_size = Some(101);
        assert_eq!(request.validate(), Err(ValidationError::PageSizeOutOfRange));

        request.page_size = Some(100);
        request.page = Some(0);
        assert_eq!(request.validate(), Err(ValidationError::PageOutOfRange));

        request.page = None;
        request.from_date = Some("01/01/2024".to_string());
        assert!(matches!(
            request.validate(),
            Err(ValidationError::InvalidDate { field: "from_date", .. })
        ));
    }

    #[test]
    fn test_empty_filters_not_forwarded_upstream() {
        let request = SearchNewsRequest {
            query: Some("rust".to_string()),
            sources: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(request.validate(), Ok(()));
        assert_eq!(param(&request.to_params(), "sources"), None);

        let request = TopHeadlinesRequest {
            sources: Some(String::new()),
            query: Some("elections".to_string()),
            ..Default::default()
        };
        let params = request.to_params();
        assert_eq!(param(&params, "sources"), None);
        assert_eq!(param(&params, "q"), Some("elections"));

        let request = NewsSourcesRequest {
            category: Some(String::new()),
            ..Default::default()
        };
        assert!(request.to_params().is_empty());
    }

    #[test]
    fn test_headlines_require_a_filter() {
        let request = TopHeadlinesRequest::default();
        assert_eq!(request.validate(), Err(ValidationError::NoHeadlineFilter));

        let request = TopHeadlinesRequest {
            country: Some("us".to_string()),
            ..Default::default()
        };
        assert_eq!(request.validate(), Ok(()));
    }

    #[test]
    fn test_headlines_query_maps_to_q() {
        let request = TopHeadlinesRequest {
            query: Some("elections".to_string()),
            ..Default::default()
        };
        let params = request.to_params();
        assert_eq!(param(&params, "q"), Some("elections"));
        assert_eq!(param(&params, "query"), None);
    }

    #[test]
    fn test_headlines_describe() {
        let request = TopHeadlinesRequest {
            country: Some("gb".to_string()),
            category: Some("technology".to_string()),
            ..Default::default()
        };
        assert_eq!(
            request.describe(),
            "Top headlines for country: GB, category: technology"
        );
    }

    #[test]
    fn test_sources_describe_and_params() {
        let request = NewsSourcesRequest {
            language: Some("en".to_string()),
            country: Some("us".to_string()),
            ..Default::default()
        };
        assert_eq!(request.validate(), Ok(()));
        assert_eq!(
            request.describe(),
            "Available news sources for language: en, country: US"
        );

        let params = request.to_params();
        assert_eq!(param(&params, "language"), Some("en"));
        assert_eq!(param(&params, "country"), Some("us"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let json = serde_json::json!({"query": "x", "page_limit": 5});
        let parsed: Result<SearchNewsRequest, _> = serde_json::from_value(json);
        assert!(parsed.is_err());
    }
}
