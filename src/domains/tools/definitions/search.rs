//! Genji full-text search tool.
//!
//! Searches the classical Japanese corpus with the API's normalization
//! toggles and renders a paginated, truncated result listing.

use rmcp::{handler::server::tool::cached_schema_for_type, model::Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::fmt::Write;
use tracing::info;

use super::common::{check_mark, display, is_truthy, truncate_chars, truthy_field};
use crate::domains::api::{ApiQuery, GenjiBackend};
use crate::domains::tools::ToolError;

/// Number of results rendered in the listing.
const MAX_LISTED_RESULTS: usize = 10;

/// Characters of result text shown before truncation.
const MAX_TEXT_CHARS: usize = 200;

/// Parameters for search operations.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    #[schemars(description = "Search query text")]
    pub query: Option<String>,

    #[schemars(description = "Maximum number of results to return (default: 20)")]
    #[schemars(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: f64,

    #[schemars(description = "Number of results to skip (default: 0)")]
    #[serde(default)]
    pub offset: f64,

    #[schemars(description = "Sort order for results")]
    pub sort: Option<String>,

    #[schemars(description = "Expand repeat marks in text (default: true)")]
    #[serde(default = "default_true")]
    pub expand_repeat_marks: bool,

    #[schemars(description = "Unify kanji and kana variations (default: true)")]
    #[serde(default = "default_true")]
    pub unify_kanji_kana: bool,

    #[schemars(description = "Unify historical kana variations (default: true)")]
    #[serde(default = "default_true")]
    pub unify_historical_kana: bool,

    #[schemars(description = "Unify phonetic variations (default: true)")]
    #[serde(default = "default_true")]
    pub unify_phonetic_changes: bool,

    #[schemars(description = "Unify dakuon (voiced sound) variations (default: true)")]
    #[serde(default = "default_true")]
    pub unify_dakuon: bool,

    #[schemars(description = "Volume/chapter filter")]
    pub vol_str: Option<Vec<String>>,
}

fn default_limit() -> f64 {
    20.0
}

fn default_true() -> bool {
    true
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: None,
            limit: default_limit(),
            offset: 0.0,
            sort: None,
            expand_repeat_marks: true,
            unify_kanji_kana: true,
            unify_historical_kana: true,
            unify_phonetic_changes: true,
            unify_dakuon: true,
            vol_str: None,
        }
    }
}

impl SearchParams {
    /// Query text, if non-empty.
    pub fn query_text(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }

    /// 1-based page number for the current offset and limit.
    ///
    /// A zero limit has no meaningful page and is shown as page 1.
    pub fn page(&self) -> f64 {
        let page = (self.offset / self.limit).floor() + 1.0;
        if page.is_finite() { page } else { 1.0 }
    }

    /// Map the parameters to the `/search` query.
    pub fn to_query(&self) -> ApiQuery {
        let mut query = ApiQuery::new()
            .scalar("page[limit]", self.limit)
            .scalar("page[offset]", self.offset)
            .scalar("filter[expandRepeatMarks]", self.expand_repeat_marks)
            .scalar("filter[unifyKanjiKana]", self.unify_kanji_kana)
            .scalar("filter[unifyHistoricalKana]", self.unify_historical_kana)
            .scalar("filter[unifyPhoneticChanges]", self.unify_phonetic_changes)
            .scalar("filter[unifyDakuon]", self.unify_dakuon)
            .scalar_opt("q", self.query_text())
            .scalar_opt("sort", self.sort.as_deref().filter(|s| !s.is_empty()));

        if let Some(volumes) = &self.vol_str {
            query = query.list("filter[vol_str]", volumes);
        }

        query
    }
}

/// Genji Search Tool implementation.
#[derive(Debug, Clone)]
pub struct SearchTool;

impl SearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "genji_search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Search classical Japanese texts with advanced normalization options";

    /// API endpoint queried by this tool.
    pub const ENDPOINT: &'static str = "/search";

    /// Execute the tool logic.
    pub async fn execute(
        backend: &dyn GenjiBackend,
        params: SearchParams,
    ) -> Result<String, ToolError> {
        info!(
            "Searching Genji corpus for {:?} (limit {}, offset {})",
            params.query_text(),
            params.limit,
            params.offset
        );
        let results = backend.get_json(Self::ENDPOINT, &params.to_query()).await?;
        Self::format(&params, &results)
    }

    /// Render a search response.
    ///
    /// Any `data` other than an array counts as no results, except a
    /// non-empty string, which has a length but no entries to list.
    pub fn format(params: &SearchParams, response: &Value) -> Result<String, ToolError> {
        let results: &[Value] = match response.get("data") {
            Some(Value::Array(items)) => items,
            Some(Value::String(s)) if !s.is_empty() => {
                return Err(ToolError::format("search `data` is a string, not a list"));
            }
            _ => &[],
        };

        let result_count = results.len();
        let total = response
            .pointer("/meta/pagination/total")
            .filter(|v| is_truthy(v))
            .map(display)
            .unwrap_or_else(|| result_count.to_string());

        let mut text = format!(
            "📚 **Genji Search Results**\n\n\
             **Query:** {query}\n\
             **Results:** {result_count} of {total} total\n\
             **Page:** {page}\n\n\
             **Normalization Settings:**\n\
             - Expand repeat marks: {}\n\
             - Unify kanji/kana: {}\n\
             - Unify historical kana: {}\n\
             - Unify phonetic changes: {}\n\
             - Unify dakuon: {}\n\n",
            check_mark(params.expand_repeat_marks),
            check_mark(params.unify_kanji_kana),
            check_mark(params.unify_historical_kana),
            check_mark(params.unify_phonetic_changes),
            check_mark(params.unify_dakuon),
            query = params.query_text().unwrap_or("(all)"),
            page = params.page(),
        );

        if result_count == 0 {
            text.push_str("\n❌ No results found for this query.");
            return Ok(text);
        }

        text.push_str("\n**Results:**\n\n");
        for (index, result) in results.iter().take(MAX_LISTED_RESULTS).enumerate() {
            let number = index as f64 + 1.0 + params.offset;
            Self::write_result(&mut text, number, result);
        }

        if result_count > MAX_LISTED_RESULTS {
            let _ = write!(
                text,
                "\n... and {} more results.",
                result_count - MAX_LISTED_RESULTS
            );
        }

        Ok(text)
    }

    fn write_result(text: &mut String, number: f64, result: &Value) {
        let _ = write!(text, "**{number}.** ");

        if let Some(attributes) = result.get("attributes") {
            if let Some(title) = truthy_field(attributes, "title") {
                let _ = writeln!(text, "**{}**", display(title));
            }

            if let Some(body) = truthy_field(attributes, "text") {
                let body = match body.as_str() {
                    Some(s) => truncate_chars(s, MAX_TEXT_CHARS),
                    None => display(body),
                };
                let _ = writeln!(text, "{body}");
            }

            if let Some(volume) = truthy_field(attributes, "vol_str") {
                let _ = writeln!(text, "*Volume:* {}", display(volume));
            }
        }

        text.push('\n');
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
