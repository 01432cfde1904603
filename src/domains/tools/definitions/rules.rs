//! Genji normalization rules listing tool.

use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::fmt::Write;
use tracing::info;

use super::common::{CHECK_OFF, CHECK_ON, display, is_truthy, truthy_field};
use crate::domains::api::{ApiQuery, GenjiBackend};
use crate::domains::tools::ToolError;

/// The rules listing takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NormalizationRulesParams {}

/// Normalization Rules Tool implementation.
#[derive(Debug, Clone)]
pub struct NormalizationRulesTool;

impl NormalizationRulesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "genji_get_normalization_rules";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the list of available text normalization rules";

    /// API endpoint queried by this tool.
    pub const ENDPOINT: &'static str = "/normalization/rules";

    /// Execute the tool logic.
    pub async fn execute(
        backend: &dyn GenjiBackend,
        _params: NormalizationRulesParams,
    ) -> Result<String, ToolError> {
        info!("Fetching normalization rules");
        let rules = backend.get_json(Self::ENDPOINT, &ApiQuery::new()).await?;
        Ok(Self::format(&rules))
    }

    /// Render a rules response.
    pub fn format(response: &Value) -> String {
        let mut text = String::from("⚙️ **Text Normalization Rules**\n\n");

        let Some(Value::Array(rules)) = response.get("data") else {
            text.push_str("No normalization rules available or data format not recognized.");
            return text;
        };

        for (index, rule) in rules.iter().enumerate() {
            let name = truthy_field(rule, "name")
                .or_else(|| rule.get("id").filter(|id| !id.is_null()))
                .map(display)
                .unwrap_or_else(|| "unknown".to_string());
            let _ = writeln!(text, "**{}. {}**", index + 1, name);

            if let Some(description) = truthy_field(rule, "description") {
                let _ = writeln!(text, "   {}", display(description));
            }

            let enabled = rule.get("enabled").is_some_and(is_truthy);
            let status = if enabled {
                format!("{CHECK_ON} Enabled")
            } else {
                format!("{CHECK_OFF} Disabled")
            };
            let _ = writeln!(text, "   Status: {status}\n");
        }

        text
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<NormalizationRulesParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
