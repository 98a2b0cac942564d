//! Tool registry for MCP tools.
//!
//! Declares the three news tools with their JSON Schemas. The schemas carry
//! the same enum lists and numeric bounds enforced again by the request
//! types in [`crate::models`], so a well-behaved client is rejected with a
//! schema error and a misbehaving one with a validation text result.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::client::NewsApiClient;
use crate::models::{CATEGORIES, COUNTRIES, LANGUAGES, SORT_FIELDS};

use super::handlers::{NewsSourcesHandler, SearchNewsHandler, TopHeadlinesHandler};

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "search-news")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Handler for executing a tool
///
/// Implementations return `Ok` with a text payload for every expected
/// outcome, including upstream and validation failures; `Err` is reserved
/// for protocol-level problems.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> Result<Value, String>;
}

/// Registry for all MCP tools
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create a registry with the three news tools wired to `client`
    pub fn new(client: Arc<NewsApiClient>, display_limit: usize) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };

        registry.register(Tool {
            name: "search-news".to_string(),
            description: "Search for news articles on any topic".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Keywords or phrases to search for in the article title and body"
                    },
                    "from_date": {
                        "type": "string",
                        "description": "Start date for article search (YYYY-MM-DD format)",
                        "pattern": "^\\d{4}-\\d{2}-\\d{2}$"
                    },
                    "to_date": {
                        "type": "string",
                        "description": "End date for article search (YYYY-MM-DD format)",
                        "pattern": "^\\d{4}-\\d{2}-\\d{2}$"
                    },
                    "sources": {
                        "type": "string",
                        "description": "Comma-separated list of news sources to filter by (e.g., 'bbc-news,cnn')"
                    },
                    "language": {
                        "type": "string",
                        "description": "Language of the articles",
                        "enum": LANGUAGES,
                        "default": "en"
                    },
                    "sort_by": {
                        "type": "string",
                        "description": "Sort articles by relevancy, popularity, or publishedAt",
                        "enum": SORT_FIELDS,
                        "default": "publishedAt"
                    },
                    "page_size": {
                        "type": "integer",
                        "description": "Number of results to return per page (max 100)",
                        "default": 20,
                        "minimum": 1,
                        "maximum": 100
                    },
                    "page": {
                        "type": "integer",
                        "description": "Page number for pagination",
                        "default": 1,
                        "minimum": 1
                    }
                },
                "required": ["query"]
            }),
            handler: Arc::new(SearchNewsHandler {
                client: client.clone(),
                display_limit,
            }),
        });

        registry.register(Tool {
            name: "get-top-headlines".to_string(),
            description: "Get top headlines by country, category, or source".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "country": {
                        "type": "string",
                        "description": "2-letter ISO 3166-1 country code",
                        "enum": COUNTRIES
                    },
                    "category": {
                        "type": "string",
                        "description": "Category to get headlines for",
                        "enum": CATEGORIES
                    },
                    "sources": {
                        "type": "string",
                        "description": "Comma-separated list of news source IDs (e.g., 'bbc-news,cnn')"
                    },
                    "query": {
                        "type": "string",
                        "description": "Keywords or phrases to search for in headlines"
                    },
                    "page_size": {
                        "type": "integer",
                        "description": "Number of results to return per page (max 100)",
                        "default": 20,
                        "minimum": 1,
                        "maximum": 100
                    },
                    "page": {
                        "type": "integer",
                        "description": "Page number for pagination",
                        "default": 1,
                        "minimum": 1
                    }
                }
            }),
            handler: Arc::new(TopHeadlinesHandler {
                client: client.clone(),
                display_limit,
            }),
        });

        registry.register(Tool {
            name: "get-news-sources".to_string(),
            description: "Get available news sources".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Find sources that display news of this category",
                        "enum": CATEGORIES
                    },
                    "language": {
                        "type": "string",
                        "description": "Find sources that display news in a specific language",
                        "enum": LANGUAGES
                    },
                    "country": {
                        "type": "string",
                        "description": "Find sources that display news in a specific country",
                        "enum": COUNTRIES
                    }
                }
            }),
            handler: Arc::new(NewsSourcesHandler {
                client,
                display_limit,
            }),
        });

        registry
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get all tools
    pub fn all(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, String> {
        let tool = self
            .get(name)
            .ok_or_else(|| format!("Tool '{}' not found", name))?;

        tool.handler.execute(args).await
    }
}
