//! Fixture data for the demo page
//!
//! Kept as JSON so the demo goes through the same decoding path an app
//! loading options from an API would.

use hc_select_ui::{parse_options, SelectConfig, SelectOption};
use tracing::error;

const PROJECTS_JSON: &str = r#"[
    {"value": "atlas", "label": "Atlas", "description": "Customer portal", "meta": "12 open"},
    {"value": "beacon", "label": "Beacon", "description": "Status page", "meta": "3 open"},
    {"value": "cobalt", "label": "Cobalt", "description": "Billing backend", "meta": "27 open"},
    {"value": "drift", "label": "Drift", "description": "Mobile app"},
    {"value": "ember", "label": "Ember", "description": "Design system", "meta": "8 open"},
    {"value": "fjord", "label": "Fjord", "description": "Data pipeline"},
    {"value": "garnet", "label": "Garnet", "description": "Internal tooling", "meta": "1 open"},
    {"value": "harbor", "label": "Harbor", "description": "Billing UI", "meta": 5}
]"#;

const PRIORITIES_JSON: &str = r#"[
    {"value": 1, "label": "Urgent", "meta": "P1"},
    {"value": 2, "label": "High", "meta": "P2"},
    {"value": 3, "label": "Normal", "meta": "P3"},
    {"value": 4, "label": "Low", "meta": "P4"}
]"#;

const PROJECT_CONFIG_JSON: &str = r#"{
    "placeholder": "Pick a project",
    "search_placeholder": "Filter projects…",
    "empty_text": "No matching projects"
}"#;

fn decode(name: &str, json: &str) -> Vec<SelectOption> {
    parse_options(json).unwrap_or_else(|e| {
        error!("Failed to decode {} fixture: {}", name, e);
        Vec::new()
    })
}

pub fn projects() -> Vec<SelectOption> {
    decode("projects", PROJECTS_JSON)
}

pub fn priorities() -> Vec<SelectOption> {
    decode("priorities", PRIORITIES_JSON)
}

pub fn project_config() -> SelectConfig {
    SelectConfig::from_json(PROJECT_CONFIG_JSON).unwrap_or_else(|e| {
        error!("Failed to decode project select config: {}", e);
        SelectConfig::default()
    })
}
