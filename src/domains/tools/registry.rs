//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The static catalog of available tools
//! - Dispatch of tool calls to their definitions
//! - Conversion of every outcome into a single `CallToolResult`

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde::de::DeserializeOwned;
use tracing::{error, info, instrument, warn};

use super::ToolError;
use super::definitions::common::{error_message, error_result, success_result};
use super::definitions::{
    HealthCheckTool, NormalizationPreviewTool, NormalizationRulesTool, SearchTool,
};
use crate::domains::api::GenjiBackend;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// Holds no per-call state; concurrent calls only share the backend.
pub struct ToolRegistry {
    backend: Arc<dyn GenjiBackend>,
}

impl ToolRegistry {
    /// Create a new tool registry over a Genji API backend.
    pub fn new(backend: Arc<dyn GenjiBackend>) -> Self {
        Self { backend }
    }

    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            HealthCheckTool::NAME,
            SearchTool::NAME,
            NormalizationRulesTool::NAME,
            NormalizationPreviewTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            HealthCheckTool::to_tool(),
            SearchTool::to_tool(),
            NormalizationRulesTool::to_tool(),
            NormalizationPreviewTool::to_tool(),
        ]
    }

    /// Call a tool by name.
    ///
    /// Always produces exactly one result. Unknown tools yield
    /// `Unknown tool: <name>`; every other failure yields `❌ Error: <message>`.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        info!("Calling tool: {}", name);

        match self.dispatch(name, arguments).await {
            Ok(text) => success_result(text),
            Err(ToolError::UnknownTool(name)) => {
                warn!("Unknown tool requested: {}", name);
                CallToolResult::error(vec![Content::text(format!("Unknown tool: {name}"))])
            }
            Err(e) => {
                if matches!(e, ToolError::Format(_)) {
                    error!("Failed to format {} response: {}", name, e);
                }
                let message = e.to_string();
                error_result(&format!("❌ Error: {}", error_message(&message)))
            }
        }
    }

    async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> Result<String, ToolError> {
        let backend = self.backend.as_ref();
        match name {
            HealthCheckTool::NAME => HealthCheckTool::execute(backend, parse_args(arguments)?).await,
            SearchTool::NAME => SearchTool::execute(backend, parse_args(arguments)?).await,
            NormalizationRulesTool::NAME => {
                NormalizationRulesTool::execute(backend, parse_args(arguments)?).await
            }
            NormalizationPreviewTool::NAME => {
                NormalizationPreviewTool::execute(backend, parse_args(arguments)?).await
            }
            _ => Err(ToolError::unknown_tool(name)),
        }
    }
}

/// Deserialize call arguments into a tool's parameter struct.
///
/// Missing arguments are treated as an empty object so defaults apply.
fn parse_args<T: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<T, ToolError> {
    serde_json::from_value(serde_json::Value::Object(arguments.unwrap_or_default()))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}
