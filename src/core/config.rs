//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Production origin of the Genji API.
pub const DEFAULT_GENJI_API_BASE: &str = "https://genji-api.aws.ldas.jp";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Remote Genji API configuration.
    pub api: ApiConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Remote Genji API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base origin every endpoint is appended to.
    pub base_url: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GENJI_API_BASE.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "genji-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            api: ApiConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_GENJI_API_BASE`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(base_url) = std::env::var("MCP_GENJI_API_BASE") {
            let base_url = base_url.trim().trim_end_matches('/');
            if !base_url.is_empty() {
                info!("Genji API base overridden: {}", base_url);
                config.api.base_url = base_url.to_string();
            }
        }

        config.transport = TransportConfig::from_env();

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_points_at_production_api() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://genji-api.aws.ldas.jp");
        assert_eq!(config.server.name, "genji-mcp-server");
        assert_eq!(config.server.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_api_base_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_GENJI_API_BASE", "http://localhost:9000/");
        }
        let config = Config::from_env();
        assert_eq!(config.api.base_url, "http://localhost:9000");
        unsafe {
            std::env::remove_var("MCP_GENJI_API_BASE");
        }
    }

    #[test]
    fn test_blank_api_base_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_GENJI_API_BASE", "  ");
        }
        let config = Config::from_env();
        assert_eq!(config.api.base_url, DEFAULT_GENJI_API_BASE);
        unsafe {
            std::env::remove_var("MCP_GENJI_API_BASE");
        }
    }
}
