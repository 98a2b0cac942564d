//! # NewsAPI MCP
//!
//! A Model Context Protocol (MCP) server that exposes NewsAPI.org article
//! search, top headlines and source listings as callable tools.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Article, NewsSource, tool requests)
//! - [`client`]: The NewsAPI HTTP client with error classification
//! - [`format`]: Plain-text rendering of articles and sources
//! - [`mcp`]: MCP protocol implementation and server
//! - [`config`]: Configuration management
//! - [`utils`]: HTTP client construction

pub mod client;
pub mod config;
pub mod format;
pub mod mcp;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use client::{ApiError, Endpoint, NewsApiClient};
pub use models::{Article, NewsSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
