use serde::{Deserialize, Serialize};

use crate::SelectError;

/// Option count above which the popup shows a search box
pub const DEFAULT_SEARCH_THRESHOLD: usize = 6;

/// Static configuration for a select instance.
///
/// Every field has a default, so a partial JSON object (or `{}`) is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Search box is shown when the option count exceeds this
    pub search_threshold: usize,
    /// Trigger text when nothing is selected
    pub placeholder: String,
    /// Placeholder of the search input
    pub search_placeholder: String,
    /// Row shown when the search matches nothing
    pub empty_text: String,
    /// Label of the secondary action row
    pub manage_label: String,
    /// Prefix for generated element ids
    pub id_prefix: String,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            search_threshold: DEFAULT_SEARCH_THRESHOLD,
            placeholder: "Select an option".to_string(),
            search_placeholder: "Search…".to_string(),
            empty_text: "No results found".to_string(),
            manage_label: "Manage projects".to_string(),
            id_prefix: "hc-select".to_string(),
        }
    }
}

impl SelectConfig {
    pub fn from_json(json: &str) -> Result<Self, SelectError> {
        serde_json::from_str(json).map_err(SelectError::InvalidConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = SelectConfig::from_json("{}").unwrap();
        assert_eq!(config, SelectConfig::default());
        assert_eq!(config.search_threshold, 6);
    }

    #[test]
    fn test_partial_override() {
        let config =
            SelectConfig::from_json(r#"{"search_threshold": 3, "manage_label": "Edit"}"#).unwrap();
        assert_eq!(config.search_threshold, 3);
        assert_eq!(config.manage_label, "Edit");
        assert_eq!(config.placeholder, "Select an option");
    }

    #[test]
    fn test_invalid_config() {
        let err = SelectConfig::from_json(r#"{"search_threshold": "many"}"#).unwrap_err();
        assert!(matches!(err, SelectError::InvalidConfig(_)));
    }
}
