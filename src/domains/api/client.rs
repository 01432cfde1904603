//! Genji API client.
//!
//! Every request is a GET against the configured base URL with a fixed
//! `Accept: application/json` header and a fixed client identifier. No
//! retries and no timeout beyond the transport defaults.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{ApiError, ApiQuery};
use crate::core::config::ApiConfig;

/// Client identifier sent as `User-Agent` on every request.
pub const USER_AGENT: &str = "Genji MCP Server";

/// Source of Genji API responses.
///
/// `endpoint` is a path such as `/search`, appended to the base URL.
#[async_trait]
pub trait GenjiBackend: Send + Sync {
    /// Issue a GET request and return the parsed JSON body.
    async fn get_json(&self, endpoint: &str, query: &ApiQuery) -> Result<Value, ApiError>;
}

/// reqwest-backed Genji API client.
#[derive(Debug, Clone)]
pub struct GenjiClient {
    client: reqwest::Client,
    base_url: String,
}

impl GenjiClient {
    /// Create a client for the configured base URL.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint, without query string.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl GenjiBackend for GenjiClient {
    #[instrument(skip(self, query))]
    async fn get_json(&self, endpoint: &str, query: &ApiQuery) -> Result<Value, ApiError> {
        let url = self.url_for(endpoint);
        debug!("GET {}?{}", url, query.to_query_string());

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(&query.pairs());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Genji API returned {} for {}", status, endpoint);
            return Err(ApiError::status(status, body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}
