//! Module handler contract.

use crate::error::{BriefError, Result};
use crate::profile::is_filled;
use serde::Serialize;
use serde_json::Value;

/// Card metadata for a content-generation module.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModuleInfo {
    /// Stable identifier, the wire value of `moduleId`
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
}

/// A named content-generation capability.
///
/// A handler validates its required inputs (failing with a validation error
/// naming the missing field) and assembles the compiled profile text, its
/// instruction template, and the user-supplied inputs into one final prompt.
/// Handlers perform no I/O; the returned prompt is handed to the external
/// generation backend by the caller.
pub trait PromptModule: Send + Sync {
    fn info(&self) -> ModuleInfo;

    /// Builds the final prompt from the compiled profile text and the
    /// module-specific input object.
    fn build_prompt(&self, profile_text: &str, input: &Value) -> Result<String>;
}

/// Extracts a required string input, failing with an error that names the
/// missing field. A value that is absent, not a string, or blank after
/// trimming all count as missing.
pub(crate) fn required_str(input: &Value, field: &str) -> Result<String> {
    match input.get(field).and_then(Value::as_str) {
        Some(value) if is_filled(value) => Ok(value.trim().to_string()),
        _ => Err(BriefError::missing_field(field)),
    }
}

/// Extracts an optional string input, `None` when absent or blank.
pub(crate) fn optional_str(input: &Value, field: &str) -> Option<String> {
    input
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| is_filled(value))
        .map(|value| value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_str_names_the_field() {
        let err = required_str(&json!({}), "customerMessage").unwrap_err();
        assert!(err.to_string().contains("customerMessage"));

        let err = required_str(&json!({"customerMessage": "   "}), "customerMessage").unwrap_err();
        assert!(err.is_validation());

        // Non-object input counts as missing too
        assert!(required_str(&json!("text"), "customerMessage").is_err());
    }

    #[test]
    fn test_optional_str_trims() {
        assert_eq!(
            optional_str(&json!({"scenario": "  delivery "}), "scenario"),
            Some("delivery".to_string())
        );
        assert_eq!(optional_str(&json!({}), "scenario"), None);
        assert_eq!(optional_str(&json!({"scenario": ""}), "scenario"), None);
    }
}
