//! Genji normalization preview tool.
//!
//! Shows how the API would normalize a piece of text: the original, the
//! normalized form and the rules that fired.

use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::fmt::Write;
use tracing::info;

use super::common::{display, truthy_field};
use crate::domains::api::{ApiQuery, GenjiBackend};
use crate::domains::tools::ToolError;

/// Parameters for normalization preview.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NormalizationPreviewParams {
    #[schemars(description = "Text to preview normalization for")]
    pub text: String,
}

/// Normalization Preview Tool implementation.
#[derive(Debug, Clone)]
pub struct NormalizationPreviewTool;

impl NormalizationPreviewTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "genji_preview_normalization";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Preview how text would be normalized with current rules";

    /// API endpoint queried by this tool.
    pub const ENDPOINT: &'static str = "/normalization/preview";

    /// Execute the tool logic.
    pub async fn execute(
        backend: &dyn GenjiBackend,
        params: NormalizationPreviewParams,
    ) -> Result<String, ToolError> {
        info!("Previewing normalization for {} chars", params.text.chars().count());
        let query = ApiQuery::new().scalar("text", &params.text);
        let preview = backend.get_json(Self::ENDPOINT, &query).await?;
        Ok(Self::format(&params.text, &preview))
    }

    /// Render a preview response for the submitted `text`.
    pub fn format(text: &str, preview: &Value) -> String {
        let mut out = format!("🔍 **Normalization Preview**\n\n**Original Text:**\n{text}\n\n");

        if let Some(normalized) = truthy_field(preview, "normalized") {
            let _ = write!(out, "**Normalized Text:**\n{}\n\n", display(normalized));
        }

        if let Some(Value::Array(rules)) = preview.get("rules_applied") {
            out.push_str("**Rules Applied:**\n");
            for rule in rules {
                let _ = writeln!(out, "- {}", display(rule));
            }
        }

        if Self::is_unchanged(preview) {
            out.push_str("\n✅ No changes needed - text is already normalized.");
        }

        out
    }

    /// Whether the API reports identical original and normalized text.
    ///
    /// A missing side means the answer is unknown, which counts as changed.
    fn is_unchanged(preview: &Value) -> bool {
        match (preview.get("original"), preview.get("normalized")) {
            (Some(original), Some(normalized)) if !original.is_null() && !normalized.is_null() => {
                original == normalized
            }
            _ => false,
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<NormalizationPreviewParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
