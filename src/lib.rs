//! Genji MCP Server Library
//!
//! Exposes the Genji API (search over classical Japanese literature and its
//! text normalization rules) as Model Context Protocol tools.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **api**: HTTP client for the remote Genji API
//!   - **tools**: Tool catalog, dispatch and response formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use genji_mcp_server::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
