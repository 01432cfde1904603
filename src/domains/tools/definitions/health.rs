//! Genji API health check tool.

use chrono::{DateTime, SecondsFormat, Utc};
use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::Tool,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::common::{display, truthy_field};
use crate::domains::api::{ApiQuery, GenjiBackend};
use crate::domains::tools::ToolError;

/// The health check takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct HealthCheckParams {}

/// Genji API Health Check Tool implementation.
#[derive(Debug, Clone)]
pub struct HealthCheckTool;

impl HealthCheckTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "genji_health_check";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Check the health status of the Genji API";

    /// API endpoint queried by this tool.
    pub const ENDPOINT: &'static str = "/health";

    /// Execute the tool logic.
    pub async fn execute(
        backend: &dyn GenjiBackend,
        _params: HealthCheckParams,
    ) -> Result<String, ToolError> {
        info!("Checking Genji API health");
        let health = backend.get_json(Self::ENDPOINT, &ApiQuery::new()).await?;
        Ok(Self::format(&health, Utc::now()))
    }

    /// Render a health response. `now` stands in for a missing timestamp.
    pub fn format(health: &Value, now: DateTime<Utc>) -> String {
        let status = truthy_field(health, "status")
            .map(display)
            .unwrap_or_else(|| "OK".to_string());
        let timestamp = truthy_field(health, "timestamp")
            .map(display)
            .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true));
        let version = truthy_field(health, "version")
            .map(|v| format!("**Version:** {}", display(v)))
            .unwrap_or_default();

        format!(
            "🟢 **Genji API Health Check**\n\n\
             **Status:** {status}\n\
             **Timestamp:** {timestamp}\n\
             {version}\n\n\
             The Genji API is operational and ready to serve classical Japanese literature queries."
        )
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<HealthCheckParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_format_full_response() {
        let text = HealthCheckTool::format(
            &json!({
                "status": "healthy",
                "timestamp": "2024-01-01T00:00:00Z",
                "version": "2.3.0"
            }),
            fixed_now(),
        );
        assert!(text.starts_with("🟢 **Genji API Health Check**"));
        assert!(text.contains("**Status:** healthy\n"));
        assert!(text.contains("**Timestamp:** 2024-01-01T00:00:00Z\n"));
        assert!(text.contains("**Version:** 2.3.0\n"));
    }

    #[test]
    fn test_format_empty_object_uses_fallbacks() {
        let text = HealthCheckTool::format(&json!({}), fixed_now());
        assert!(text.contains("**Status:** OK\n"));
        assert!(text.contains("**Timestamp:** 2024-05-01T12:30:00.000Z\n"));
        assert!(!text.contains("**Version:**"));
        assert!(text.ends_with("classical Japanese literature queries."));
    }

    #[test]
    fn test_format_blank_status_falls_back() {
        let text = HealthCheckTool::format(&json!({ "status": "" }), fixed_now());
        assert!(text.contains("**Status:** OK\n"));
    }
}
