//! NewsAPI HTTP client.
//!
//! [`NewsApiClient::perform`] is the single path to the upstream API: it
//! serializes query parameters, injects the credential, issues one GET under
//! the configured timeout and classifies every failure into an [`ApiError`].
//! Exactly one of success/failure comes back; nothing here panics and no
//! retries are attempted.

use serde_json::Value;
use std::time::Duration;

use crate::config::Config;
use crate::utils::HttpClient;

/// Upstream query parameter carrying the credential
const API_KEY_PARAM: &str = "apiKey";

/// The three NewsAPI v2 endpoints this server consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `everything` - full article search
    Everything,
    /// `top-headlines` - breaking headlines
    TopHeadlines,
    /// `top-headlines/sources` - available outlets
    Sources,
}

impl Endpoint {
    /// Path segment under the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Everything => "everything",
            Endpoint::TopHeadlines => "top-headlines",
            Endpoint::Sources => "top-headlines/sources",
        }
    }
}

/// Errors from one upstream call, each carrying its user-facing description
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No API key configured
    #[error("Missing API key. Set the NEWS_API_KEY environment variable.")]
    MissingApiKey,

    /// Caller tried to smuggle the credential in through the parameter map
    #[error("Invalid request: the apiKey parameter is injected by the client and must not be supplied")]
    CredentialInParams,

    /// Request exceeded the configured timeout
    #[error("Request timed out after 30 seconds. The News API may be experiencing delays.")]
    Timeout,

    /// DNS/connect failure
    #[error("Failed to connect to News API. Please check your internet connection.")]
    Connect,

    /// HTTP 429
    #[error("Rate limit exceeded. The News API has a limit of 100 requests per day for the free tier.")]
    RateLimited,

    /// HTTP 401
    #[error("Unauthorized. API key invalid or expired.")]
    Unauthorized,

    /// HTTP 400, carrying the raw upstream body
    #[error("Bad request. Error details: {0}")]
    BadRequest(String),

    /// Any other non-2xx status
    #[error("HTTP error occurred: status {status} - Response: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    /// 2xx response whose payload carries `"status": "error"`
    #[error("News API error: {0}")]
    Upstream(String),

    /// Anything else (body read failure, malformed JSON, ...)
    #[error("Unexpected error occurred: {0}")]
    Unexpected(String),
}

/// Client for the NewsAPI v2 HTTP API
///
/// Construct once at startup from the loaded [`Config`] and share via `Arc`;
/// concurrent tool calls are independent and share only the connection pool.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl NewsApiClient {
    /// Create a client from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            http: HttpClient::new(Duration::from_secs(config.timeout_secs)),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Whether an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Issue one GET request to `endpoint` and classify the outcome.
    ///
    /// `params` must not contain the `apiKey` parameter; it is injected here.
    pub async fn perform(
        &self,
        endpoint: Endpoint,
        params: &[(&'static str, String)],
    ) -> Result<Value, ApiError> {
        if params.iter().any(|(key, _)| *key == API_KEY_PARAM) {
            return Err(ApiError::CredentialInParams);
        }
        let api_key = self.api_key.as_deref().ok_or(ApiError::MissingApiKey)?;

        let url = format!("{}/{}", self.base_url, endpoint.path());
        let mut query: Vec<(&str, &str)> =
            params.iter().map(|(key, value)| (*key, value.as_str())).collect();
        query.push((API_KEY_PARAM, api_key));

        tracing::debug!(endpoint = endpoint.path(), "calling NewsAPI");

        let response = match self.http.client().get(&url).query(&query).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err(ApiError::Timeout),
            Err(e) if e.is_connect() => return Err(ApiError::Connect),
            Err(e) => return Err(ApiError::Unexpected(e.to_string())),
        };

        let status = response.status();
        match status.as_u16() {
            429 => return Err(ApiError::RateLimited),
            401 => return Err(ApiError::Unauthorized),
            400 => {
                let body = response.text().await.unwrap_or_default();
                return Err(ApiError::BadRequest(body));
            }
            _ => {}
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http { status, body });
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Unexpected(e.to_string()))?;

        if data.get("status").and_then(Value::as_str) == Some("error") {
            let message = data
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error");
            return Err(ApiError::Upstream(message.to_string()));
        }

        Ok(data)
    }
}
