//! Tool-specific error types.

use thiserror::Error;

use crate::domains::api::ApiError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not in the catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The arguments do not match the tool's parameter struct.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The Genji API request failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The API response does not have the shape a formatter expects.
    #[error("Unexpected response format: {0}")]
    Format(String),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "format" error.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }
}
