//! Option model shared by the select controller and its views

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::SelectError;

/// Identifier of a selectable option.
///
/// Options are matched against the selected value by equality only, so
/// parents with structured values pick a string or integer key for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Int(n) => write!(f, "{}", n),
            OptionValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

/// A single row of the select popup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: OptionValue,
    /// Primary text, shown on the trigger when selected
    #[serde(default, deserialize_with = "lenient_label")]
    pub label: String,
    /// Secondary line under the label
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Right-aligned annotation (counts, shortcuts, ...)
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub meta: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<OptionValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
            meta: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = Some(meta.into());
        self
    }
}

/// Decode an option list from JSON.
///
/// Text fields holding anything other than a string are treated as absent
/// rather than rejected.
pub fn parse_options(json: &str) -> Result<Vec<SelectOption>, SelectError> {
    serde_json::from_str(json).map_err(SelectError::InvalidOptions)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_value_types() {
        let options = parse_options(
            r#"[
                {"value": 1, "label": "One"},
                {"value": "two", "label": "Two", "description": "second"},
                {"value": true, "label": "Yes", "meta": "bool"}
            ]"#,
        )
        .unwrap();

        assert_eq!(options[0].value, OptionValue::Int(1));
        assert_eq!(options[1].value, OptionValue::from("two"));
        assert_eq!(options[1].description.as_deref(), Some("second"));
        assert_eq!(options[2].value, OptionValue::Bool(true));
        assert_eq!(options[2].meta.as_deref(), Some("bool"));
    }

    #[test]
    fn test_parse_tolerates_non_string_text() {
        let options = parse_options(
            r#"[{"value": 7, "label": 42, "description": null, "meta": {"n": 1}}]"#,
        )
        .unwrap();

        assert_eq!(options[0].label, "");
        assert_eq!(options[0].description, None);
        assert_eq!(options[0].meta, None);
    }

    #[test]
    fn test_parse_missing_text_fields() {
        let options = parse_options(r#"[{"value": "a"}]"#).unwrap();
        assert_eq!(options[0], SelectOption::new("a", ""));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_options("[{").unwrap_err();
        assert!(matches!(err, SelectError::InvalidOptions(_)));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(OptionValue::Int(3).to_string(), "3");
        assert_eq!(OptionValue::Bool(false).to_string(), "false");
        assert_eq!(OptionValue::from("abc").to_string(), "abc");
    }
}
