//! MCP server implementation using pmcp (Pragmatic AI's rust-mcp-sdk).
//!
//! Wraps the tool registry in a pmcp `Server` handling JSON-RPC over stdio
//! or HTTP/SSE.

use async_trait::async_trait;
use pmcp::{
    server::streamable_http_server::StreamableHttpServer, Error, RequestHandlerExtra, Server,
    ServerCapabilities, ToolHandler, ToolInfo,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::mcp::tools::ToolRegistry;

/// The MCP server for NewsAPI tools
///
/// Holds the tool registry and builds a fresh pmcp `Server` when a
/// transport starts; `run_stdio` takes ownership of the server, so it
/// cannot be shared between transports.
#[derive(Debug, Clone)]
pub struct McpServer {
    tools: ToolRegistry,
}

impl McpServer {
    /// Create a new MCP server from a tool registry
    pub fn new(tools: ToolRegistry) -> Result<Self, pmcp::Error> {
        // Surface tool registration problems at construction rather than
        // at transport startup
        Self::build_server_impl(&tools)?;
        Ok(Self { tools })
    }

    fn build_server_impl(tools: &ToolRegistry) -> Result<Server, pmcp::Error> {
        let mut builder = Server::builder()
            .name("newsapi-mcp")
            .version(env!("CARGO_PKG_VERSION"))
            .capabilities(ServerCapabilities::default());

        for tool in tools.all() {
            let tool_handler = ToolWrapper {
                name: tool.name.clone(),
                description: Some(tool.description.clone()),
                input_schema: tool.input_schema.clone(),
                handler: tool.handler.clone(),
            };
            builder = builder.tool(tool_handler.name.clone(), tool_handler);
        }

        builder.build()
    }

    /// Run the server in stdio mode (for Claude Desktop and other MCP clients)
    pub async fn run(&self) -> Result<(), pmcp::Error> {
        tracing::info!("Starting MCP server in stdio mode");

        let server = Self::build_server_impl(&self.tools)?;
        server.run_stdio().await
    }

    /// Run the server in HTTP/SSE mode
    pub async fn run_http(&self, addr: &str) -> Result<(SocketAddr, JoinHandle<()>), pmcp::Error> {
        tracing::info!("Starting MCP server in HTTP/SSE mode on {}", addr);

        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| Error::invalid_params(format!("Invalid address: {}", e)))?;

        let server = Self::build_server_impl(&self.tools)?;
        let http_server = StreamableHttpServer::new(socket_addr, Arc::new(Mutex::new(server)));
        http_server.start().await
    }
}

/// Wrapper adapting our [`crate::mcp::ToolHandler`] to pmcp's `ToolHandler`
#[derive(Clone)]
struct ToolWrapper {
    name: String,
    description: Option<String>,
    input_schema: Value,
    handler: Arc<dyn crate::mcp::tools::ToolHandler>,
}

#[async_trait]
impl ToolHandler for ToolWrapper {
    async fn handle(&self, args: Value, _extra: RequestHandlerExtra) -> Result<Value, Error> {
        self.handler
            .execute(args)
            .await
            .map_err(|e| Error::internal(&e))
    }

    fn metadata(&self) -> Option<ToolInfo> {
        Some(ToolInfo::new(
            self.name.clone(),
            self.description.clone(),
            self.input_schema.clone(),
        ))
    }
}
