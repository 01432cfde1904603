//! Common utilities shared across Genji tools.
//!
//! The Genji API returns loosely shaped JSON, so formatters read fields
//! through these helpers instead of deserializing into fixed structs.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;
use tracing::warn;

/// Marker shown for an enabled setting.
pub const CHECK_ON: &str = "✅";

/// Marker shown for a disabled setting.
pub const CHECK_OFF: &str = "❌";

/// Whether a JSON value counts as "present" for display purposes.
///
/// `null`, `false`, `0` and `""` are absent; arrays and objects are present.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Look up `key` on an object, keeping it only when truthy.
pub fn truthy_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| is_truthy(v))
}

/// Render a JSON value as display text. Strings are shown unquoted.
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Truncate to `max` characters, appending `...` when anything was cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Checklist marker for a boolean setting.
pub fn check_mark(enabled: bool) -> &'static str {
    if enabled { CHECK_ON } else { CHECK_OFF }
}

/// Message carried by an error result, with a fallback for blank messages.
pub fn error_message(message: &str) -> &str {
    if message.trim().is_empty() {
        "Unknown error"
    } else {
        message
    }
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("ok")));
        assert!(is_truthy(&json!(12)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_display_strings_unquoted() {
        assert_eq!(display(&json!("桐壺")), "桐壺");
        assert_eq!(display(&json!(42)), "42");
        assert_eq!(display(&json!(true)), "true");
    }

    #[test]
    fn test_truncate_chars() {
        let long = "あ".repeat(250);
        let cut = truncate_chars(&long, 200);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.ends_with("..."));
        assert!(cut.starts_with(&"あ".repeat(200)));

        let short = "a".repeat(150);
        assert_eq!(truncate_chars(&short, 200), short);

        let exact = "a".repeat(200);
        assert_eq!(truncate_chars(&exact, 200), exact);
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(error_message(""), "Unknown error");
        assert_eq!(error_message("  "), "Unknown error");
        assert_eq!(error_message("boom"), "boom");
    }
}
