//! Transport layer for the MCP server.
//!
//! The MCP protocol framing comes from rmcp; this layer only decides how the
//! server is reached:
//! - **STDIO** (feature `stdio`, default): one session over stdin/stdout
//! - **TCP** (feature `tcp`): one session per accepted connection
//! - **HTTP** (feature `http`): JSON-RPC over POST, served by axum

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
