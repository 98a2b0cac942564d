//! Configuration management.
//!
//! Configuration is loaded once at startup and passed read-only into the
//! client. Values come from (lowest to highest precedence) built-in
//! defaults, an optional TOML file, and `NEWSAPI_*` environment variables.
//! The API key itself is read from `NEWS_API_KEY`.
//!
//! ```toml
//! base_url = "https://newsapi.org/v2"
//! timeout_secs = 30
//! display_limit = 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default NewsAPI v2 base address
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// NewsAPI credential. Absence is fatal when serving but only a
    /// per-call error for the client itself.
    #[serde(default = "api_key_from_env")]
    pub api_key: Option<String>,

    /// Upstream base URL (overridable for testing against a mock server)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of articles/sources rendered per result
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: api_key_from_env(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            display_limit: default_display_limit(),
        }
    }
}

fn api_key_from_env() -> Option<String> {
    std::env::var("NEWS_API_KEY").ok().filter(|k| !k.is_empty())
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_display_limit() -> usize {
    5
}

/// Load configuration from a TOML file, with `NEWSAPI_*` env overrides
pub fn load_config(path: &PathBuf) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path.as_path()))
        .add_source(config::Environment::with_prefix("NEWSAPI"))
        .build()?;

    settings.try_deserialize()
}

/// Find a config file in the default locations
///
/// Checks `./newsapi-mcp.toml` first, then the platform config directory
/// (e.g. `~/.config/newsapi-mcp/config.toml`).
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("newsapi-mcp.toml");
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("newsapi-mcp").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Get the default configuration (from env vars or defaults)
pub fn get_config() -> Config {
    Config::default()
}
