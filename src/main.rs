use anyhow::Result;
use clap::{Parser, Subcommand};
use newsapi_mcp::config::{find_config_file, get_config, load_config, Config};
use newsapi_mcp::format::{format_articles, format_sources};
use newsapi_mcp::mcp::{McpServer, ToolRegistry};
use newsapi_mcp::models::{
    articles_from_payload, sources_from_payload, NewsSourcesRequest, SearchNewsRequest,
    TopHeadlinesRequest,
};
use newsapi_mcp::{Endpoint, NewsApiClient};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// NewsAPI MCP - search news articles, top headlines and sources via NewsAPI.org
#[derive(Parser, Debug)]
#[command(name = "newsapi-mcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "hongkongkiwi")]
#[command(about = "MCP server and CLI for NewsAPI.org", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for news articles by query string
    #[command(alias = "s")]
    Search {
        /// Search query string
        query: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from_date: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to_date: Option<String>,

        /// Comma-separated source IDs (e.g., 'bbc-news,cnn')
        #[arg(long)]
        sources: Option<String>,

        /// Article language (e.g., 'en')
        #[arg(long)]
        language: Option<String>,

        /// Sort field: relevancy, popularity, or publishedAt
        #[arg(long)]
        sort_by: Option<String>,

        /// Results per page (1-100)
        #[arg(long)]
        page_size: Option<u32>,

        /// Page number
        #[arg(long)]
        page: Option<u32>,
    },

    /// Get top headlines by country, category, source or query
    #[command(alias = "h")]
    Headlines {
        /// 2-letter country code (e.g., 'us')
        #[arg(long)]
        country: Option<String>,

        /// Headline category (e.g., 'technology')
        #[arg(long)]
        category: Option<String>,

        /// Comma-separated source IDs
        #[arg(long)]
        sources: Option<String>,

        /// Keywords to search for in headlines
        #[arg(long)]
        query: Option<String>,

        /// Results per page (1-100)
        #[arg(long)]
        page_size: Option<u32>,

        /// Page number
        #[arg(long)]
        page: Option<u32>,
    },

    /// List available news sources
    Sources {
        /// Source category (e.g., 'business')
        #[arg(long)]
        category: Option<String>,

        /// Source language (e.g., 'en')
        #[arg(long)]
        language: Option<String>,

        /// 2-letter country code
        #[arg(long)]
        country: Option<String>,
    },

    /// Run the MCP server (for Claude Desktop and other MCP clients)
    Serve {
        /// Use stdio transport (default)
        #[arg(long, default_value_t = false)]
        stdio: bool,

        /// Use HTTP/SSE transport
        #[arg(long, default_value_t = false)]
        http: bool,

        /// Host to bind in HTTP mode
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind in HTTP mode
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("newsapi_mcp={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        get_config()
    };

    let client = Arc::new(NewsApiClient::new(&config));

    match cli.command {
        Some(Commands::Search {
            query,
            from_date,
            to_date,
            sources,
            language,
            sort_by,
            page_size,
            page,
        }) => {
            let request = SearchNewsRequest {
                query: Some(query),
                from_date,
                to_date,
                sources,
                language,
                sort_by,
                page_size,
                page,
            };
            if let Err(e) = request.validate() {
                anyhow::bail!("{}", e);
            }

            match client.perform(Endpoint::Everything, &request.to_params()).await {
                Ok(data) => {
                    let articles = articles_from_payload(&data);
                    println!("{}", format_articles(&articles, config.display_limit));
                }
                Err(e) => println!("Error: {}", e),
            }
        }

        Some(Commands::Headlines {
            country,
            category,
            sources,
            query,
            page_size,
            page,
        }) => {
            let request = TopHeadlinesRequest {
                country,
                category,
                sources,
                query,
                page_size,
                page,
            };
            if let Err(e) = request.validate() {
                anyhow::bail!("{}", e);
            }

            match client
                .perform(Endpoint::TopHeadlines, &request.to_params())
                .await
            {
                Ok(data) => {
                    let articles = articles_from_payload(&data);
                    println!("{}", request.describe());
                    println!();
                    println!("{}", format_articles(&articles, config.display_limit));
                }
                Err(e) => println!("Error: {}", e),
            }
        }

        Some(Commands::Sources {
            category,
            language,
            country,
        }) => {
            let request = NewsSourcesRequest {
                category,
                language,
                country,
            };
            if let Err(e) = request.validate() {
                anyhow::bail!("{}", e);
            }

            match client.perform(Endpoint::Sources, &request.to_params()).await {
                Ok(data) => {
                    let sources = sources_from_payload(&data);
                    println!("{}", request.describe());
                    println!();
                    println!("{}", format_sources(&sources, config.display_limit));
                }
                Err(e) => println!("Error: {}", e),
            }
        }

        Some(Commands::Serve {
            stdio,
            http,
            host,
            port,
        }) => {
            serve(client, &config, stdio, http, &host, port).await?;
        }

        // No subcommand: behave as an MCP stdio server so the binary can be
        // pointed at directly from an MCP client config
        None => {
            serve(client, &config, true, false, "127.0.0.1", 3000).await?;
        }
    }

    Ok(())
}

async fn serve(
    client: Arc<NewsApiClient>,
    config: &Config,
    stdio: bool,
    http: bool,
    host: &str,
    port: u16,
) -> Result<()> {
    if !client.has_api_key() {
        anyhow::bail!("Missing NEWS_API_KEY environment variable");
    }

    let registry = ToolRegistry::new(client, config.display_limit);
    let server = McpServer::new(registry)?;

    // stdio is the default transport; --http switches to HTTP/SSE
    let use_http = http && !stdio;
    if use_http {
        let addr = format!("{}:{}", host, port);
        let (bound_addr, handle) = server.run_http(&addr).await?;
        tracing::info!("MCP server listening on {}", bound_addr);

        handle
            .await
            .map_err(|e| anyhow::anyhow!("Server task failed: {}", e))?;
    } else {
        server.run().await?;
    }

    Ok(())
}
