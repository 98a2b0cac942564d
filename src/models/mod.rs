//! Core data models.

mod article;
mod request;

pub use article::{
    articles_from_payload, sources_from_payload, total_results, Article, ArticleSource,
    NewsSource,
};
pub use request::{
    NewsSourcesRequest, SearchNewsRequest, TopHeadlinesRequest, ValidationError, CATEGORIES,
    COUNTRIES, LANGUAGES, SORT_FIELDS,
};
