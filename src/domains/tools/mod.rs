//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Each tool maps a call onto one Genji API endpoint and renders the JSON
//! answer as readable text.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Tool catalog and call dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define params, `execute()`, `format()` and `to_tool()`
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs` (catalog and dispatch)

pub mod definitions;
mod error;
mod registry;

pub use error::ToolError;
pub use registry::ToolRegistry;
