//! hc-select demo - web page exercising the select in its main configurations
//!
//! - a searchable project picker (more options than the search threshold)
//!   with the manage row wired up
//! - a short priority picker without search
//! - a disabled select

mod demo_data;

use dioxus::prelude::*;
use hc_select_ui::{HcSelect, IdGenerator, OptionValue};
use tracing::info;

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

#[component]
fn App() -> Element {
    use_context_provider(|| IdGenerator::new("demo-select"));

    let projects = use_hook(demo_data::projects);
    let priorities = use_hook(demo_data::priorities);
    let project_config = use_hook(demo_data::project_config);

    let mut project = use_signal(|| Some(OptionValue::from("cobalt")));
    let mut priority: Signal<Option<OptionValue>> = use_signal(|| None);
    let mut manage_clicks = use_signal(|| 0u32);

    let project_text = project()
        .map(|value| value.to_string())
        .unwrap_or_else(|| "none".to_string());
    let priority_text = priority()
        .map(|value| value.to_string())
        .unwrap_or_else(|| "none".to_string());

    rsx! {
        document::Script { src: TAILWIND_CDN }
        div { class: "min-h-screen bg-gray-950 text-gray-200 p-8",
            h1 { class: "text-lg font-semibold mb-6", "hc-select" }

            div { class: "grid gap-8 max-w-md",
                section {
                    label {
                        r#for: "project-picker",
                        class: "block text-xs text-gray-400 mb-1",
                        "Project"
                    }
                    HcSelect {
                        id: "project-picker".to_string(),
                        value: project(),
                        options: projects.clone(),
                        config: project_config.clone(),
                        onupdate: move |value: OptionValue| project.set(Some(value)),
                        onchange: move |value: OptionValue| info!("Project changed to {}", value),
                        onmanage: move |_| {
                            manage_clicks += 1;
                            info!("Manage projects requested");
                        },
                    }
                    p { class: "mt-2 text-xs text-gray-500",
                        "Selected: {project_text} · manage clicked {manage_clicks} times"
                    }
                }

                section {
                    label { class: "block text-xs text-gray-400 mb-1", "Priority" }
                    HcSelect {
                        value: priority(),
                        options: priorities.clone(),
                        placeholder: "No priority".to_string(),
                        onupdate: move |value: OptionValue| priority.set(Some(value)),
                    }
                    p { class: "mt-2 text-xs text-gray-500", "Selected: {priority_text}" }
                }

                section {
                    label { class: "block text-xs text-gray-400 mb-1", "Archived project" }
                    HcSelect {
                        value: Some(OptionValue::from("drift")),
                        options: projects.clone(),
                        disabled: true,
                    }
                }
            }
        }
    }
}

fn main() {
    if let Err(e) = dioxus::logger::init(tracing::Level::INFO) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    dioxus::launch(App);
}
