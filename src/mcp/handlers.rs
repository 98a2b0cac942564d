//! Tool handlers: validate arguments, call the API, format the result.
//!
//! Every expected failure (bad arguments, upstream errors, zero results)
//! comes back as `Ok` with a descriptive text payload; the caller sees a
//! plain message, never a crash.

use std::sync::Arc;

use serde_json::Value;

use super::tools::ToolHandler;
use crate::client::{Endpoint, NewsApiClient};
use crate::format::{format_articles, format_sources};
use crate::models::{
    articles_from_payload, sources_from_payload, total_results, NewsSourcesRequest,
    SearchNewsRequest, TopHeadlinesRequest,
};

fn text(message: String) -> Value {
    Value::String(message)
}

/// Handler for the `search-news` tool
#[derive(Debug)]
pub struct SearchNewsHandler {
    pub client: Arc<NewsApiClient>,
    pub display_limit: usize,
}

#[async_trait::async_trait]
impl ToolHandler for SearchNewsHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let request: SearchNewsRequest = match serde_json::from_value(args) {
            Ok(request) => request,
            Err(e) => return Ok(text(format!("Invalid arguments: {}", e))),
        };
        if let Err(e) = request.validate() {
            return Ok(text(e.to_string()));
        }

        let data = match self
            .client
            .perform(Endpoint::Everything, &request.to_params())
            .await
        {
            Ok(data) => data,
            Err(e) => return Ok(text(format!("Error: {}", e))),
        };

        let articles = articles_from_payload(&data);
        let total = total_results(&data);

        if articles.is_empty() {
            return Ok(text(format!(
                "No articles found for query: '{}'",
                request.query()
            )));
        }

        let formatted = format_articles(&articles, self.display_limit);
        Ok(text(format!(
            "Search results for '{}' (Found {} articles):\n\n{}",
            request.query(),
            total,
            formatted
        )))
    }
}

/// Handler for the `get-top-headlines` tool
#[derive(Debug)]
pub struct TopHeadlinesHandler {
    pub client: Arc<NewsApiClient>,
    pub display_limit: usize,
}

#[async_trait::async_trait]
impl ToolHandler for TopHeadlinesHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let request: TopHeadlinesRequest = match serde_json::from_value(args) {
            Ok(request) => request,
            Err(e) => return Ok(text(format!("Invalid arguments: {}", e))),
        };
        // Rejects filter-less requests before any network activity
        if let Err(e) = request.validate() {
            return Ok(text(e.to_string()));
        }

        let data = match self
            .client
            .perform(Endpoint::TopHeadlines, &request.to_params())
            .await
        {
            Ok(data) => data,
            Err(e) => return Ok(text(format!("Error: {}", e))),
        };

        let articles = articles_from_payload(&data);
        let total = total_results(&data);

        if articles.is_empty() {
            return Ok(text(
                "No headlines found matching your criteria".to_string(),
            ));
        }

        let formatted = format_articles(&articles, self.display_limit);
        Ok(text(format!(
            "{} (Found {} articles):\n\n{}",
            request.describe(),
            total,
            formatted
        )))
    }
}

/// Handler for the `get-news-sources` tool
#[derive(Debug)]
pub struct NewsSourcesHandler {
    pub client: Arc<NewsApiClient>,
    pub display_limit: usize,
}

#[async_trait::async_trait]
impl ToolHandler for NewsSourcesHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let request: NewsSourcesRequest = match serde_json::from_value(args) {
            Ok(request) => request,
            Err(e) => return Ok(text(format!("Invalid arguments: {}", e))),
        };
        if let Err(e) = request.validate() {
            return Ok(text(e.to_string()));
        }

        let data = match self
            .client
            .perform(Endpoint::Sources, &request.to_params())
            .await
        {
            Ok(data) => data,
            Err(e) => return Ok(text(format!("Error: {}", e))),
        };

        let sources = sources_from_payload(&data);

        if sources.is_empty() {
            return Ok(text(
                "No news sources found matching your criteria".to_string(),
            ));
        }

        let formatted = format_sources(&sources, self.display_limit);
        Ok(text(format!(
            "{} (Found {} sources):\n\n{}",
            request.describe(),
            sources.len(),
            formatted
        )))
    }
}
