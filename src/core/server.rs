//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool registry.
//!
//! `McpServer` is the composition root: it owns the configuration and the
//! registry, and the registry owns the Genji API backend. It is built once
//! at startup and cloned cheaply into every transport session.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::api::{GenjiBackend, GenjiClient};
use crate::domains::tools::ToolRegistry;

/// Instructions advertised to clients on initialize.
pub const INSTRUCTIONS: &str = "Genji MCP server. Search classical Japanese literature \
     (The Tale of Genji corpus) through the Genji API, list its text normalization rules \
     and preview how text is normalized.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and routes
/// tool listing and tool calls to the `ToolRegistry`.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool catalog and dispatcher.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server talking to the configured Genji API.
    pub fn new(config: Config) -> Result<Self> {
        let client = GenjiClient::new(&config.api)?;
        info!("Genji API base: {}", client.base_url());
        Ok(Self::with_backend(config, Arc::new(client)))
    }

    /// Create a server over an arbitrary Genji API backend.
    pub fn with_backend(config: Config, backend: Arc<dyn GenjiBackend>) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(ToolRegistry::new(backend)),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools as JSON (for HTTP transport).
    pub fn list_tools_json(&self) -> Vec<serde_json::Value> {
        ToolRegistry::get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name and serialize the result (for HTTP transport).
    ///
    /// Non-object arguments are treated as absent.
    pub async fn call_tool_json(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let result = self
            .registry
            .call_tool(name, arguments.as_object().cloned())
            .await;
        Ok(serde_json::to_value(result)?)
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: ToolRegistry::get_all_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        Ok(self
            .registry
            .call_tool(&request.name, request.arguments)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::api::{ApiError, ApiQuery};
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct StaticBackend(Value);

    #[async_trait]
    impl GenjiBackend for StaticBackend {
        async fn get_json(&self, _endpoint: &str, _query: &ApiQuery) -> std::result::Result<Value, ApiError> {
            Ok(self.0.clone())
        }
    }

    fn server(response: Value) -> McpServer {
        McpServer::with_backend(Config::default(), Arc::new(StaticBackend(response)))
    }

    #[test]
    fn test_server_info() {
        let server = server(json!({}));
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert_eq!(info.server_info.name, "genji-mcp-server");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_list_tools_json() {
        let tools = server(json!({})).list_tools_json();
        assert_eq!(tools.len(), 4);
        assert!(tools.iter().all(|t| t["inputSchema"].is_object()));
        assert_eq!(tools[1]["name"], "genji_search");
    }

    #[tokio::test]
    async fn test_call_tool_json_serializes_result() {
        let server = server(json!({ "status": "up", "version": "1.2.3" }));

        let ok = server
            .call_tool_json("genji_health_check", json!({}))
            .await
            .unwrap();
        assert_eq!(ok["content"][0]["type"], "text");
        assert!(ok["content"][0]["text"].as_str().unwrap().contains("**Version:** 1.2.3"));
        assert_ne!(ok["isError"], json!(true));

        let unknown = server.call_tool_json("nope", json!({})).await.unwrap();
        assert_eq!(unknown["isError"], json!(true));
        assert_eq!(unknown["content"][0]["text"], "Unknown tool: nope");
    }
}
