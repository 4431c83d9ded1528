//! Accessible select (combobox) replacing native `<select>` elements
//!
//! ```ignore
//! HcSelect {
//!     value: project(),
//!     options: projects.clone(),
//!     onupdate: move |value| project.set(Some(value)),
//!     onmanage: move |_| show_project_settings.set(true),
//! }
//! ```
//!
//! All state transitions live in [`SelectController`]. This view renders its
//! state, forwards pointer/keyboard input to it, calls the parent's handlers
//! for the notifications it emits, and performs the focus/scroll effects it
//! asks for once the next render has reached the DOM.

use std::collections::HashSet;

use dioxus::dioxus_core::{Runtime, RuntimeGuard};
use dioxus::prelude::*;
use hc_select_common::{
    listbox_id, option_id, popup_id, search_input_id, DomEffect, FocusTarget, IdGenerator,
    Notification, OptionValue, SelectConfig, SelectController, SelectInputs, SelectKey,
    SelectOption,
};

use crate::components::icons::{CheckIcon, ChevronDownIcon, SearchIcon, SlidersIcon};
use crate::wasm_utils::{self, DocumentEventListener};

/// Latest props, readable from event handlers and effects
#[derive(Clone, Default)]
struct SelectData {
    options: Vec<SelectOption>,
    value: Option<OptionValue>,
    disabled: bool,
    search_threshold: usize,
}

impl SelectData {
    fn inputs(&self) -> SelectInputs<'_> {
        SelectInputs::new(&self.options, self.value.as_ref())
            .disabled(self.disabled)
            .search_threshold(self.search_threshold)
    }
}

/// Copyable bundle that runs a controller transition and dispatches its output
#[derive(Clone, Copy, PartialEq)]
struct SelectHandle {
    controller: Signal<SelectController>,
    data: CopyValue<SelectData>,
    /// Bumped whenever after-render work is queued
    render_tick: Signal<u64>,
    onupdate: EventHandler<OptionValue>,
    onchange: EventHandler<OptionValue>,
    onmanage: EventHandler<()>,
}

impl SelectHandle {
    fn apply<R>(mut self, f: impl FnOnce(&mut SelectController, &SelectInputs<'_>) -> R) -> R {
        let (result, notifications, pending) = {
            let data = self.data.read();
            let inputs = data.inputs();
            let mut controller = self.controller.write();
            let result = f(&mut controller, &inputs);
            (
                result,
                controller.take_notifications(),
                controller.has_pending_render_work(),
            )
        };

        if pending {
            self.render_tick += 1;
        }

        for notification in notifications {
            match notification {
                Notification::ValueChanged(value) => self.onupdate.call(value),
                Notification::Change(value) => self.onchange.call(value),
                Notification::Manage => self.onmanage.call(()),
            }
        }

        result
    }

    fn apply_dom_effects(self, effects: Vec<DomEffect>) {
        if effects.is_empty() {
            return;
        }
        let component_id = self.controller.peek().component_id().to_string();
        for effect in effects {
            match effect {
                DomEffect::Focus(FocusTarget::Trigger) => wasm_utils::focus_element(&component_id),
                DomEffect::Focus(FocusTarget::SearchInput) => {
                    wasm_utils::focus_element(&search_input_id(&component_id))
                }
                DomEffect::Focus(FocusTarget::Listbox) => {
                    wasm_utils::focus_element(&listbox_id(&component_id))
                }
                DomEffect::ScrollIntoView(row) => {
                    wasm_utils::scroll_into_view_nearest(&option_id(&component_id, row))
                }
            }
        }
    }
}

fn select_key(evt: &KeyboardEvent) -> SelectKey {
    match evt.key() {
        Key::ArrowDown => SelectKey::ArrowDown,
        Key::ArrowUp => SelectKey::ArrowUp,
        Key::Home => SelectKey::Home,
        Key::End => SelectKey::End,
        Key::Enter => SelectKey::Enter,
        Key::Escape => SelectKey::Escape,
        Key::Tab => SelectKey::Tab,
        Key::Character(c) if c == " " => SelectKey::Space,
        _ => SelectKey::Other,
    }
}

/// App-wide id generator.
///
/// Apps can provide their own with `use_context_provider`; otherwise one is
/// installed in the root scope on first use.
fn id_generator(prefix: &str) -> IdGenerator {
    try_consume_context::<IdGenerator>()
        .unwrap_or_else(|| provide_root_context(IdGenerator::new(prefix)))
}

/// Styled, keyboard-accessible select with optional search
#[component]
pub fn HcSelect(
    /// Id of the trigger button; generated when absent
    #[props(default)]
    id: Option<String>,
    /// Currently selected value
    #[props(default)]
    value: Option<OptionValue>,
    /// Options in display order
    #[props(default)]
    options: Vec<SelectOption>,
    /// Trigger text when nothing is selected (overrides the config's)
    #[props(default)]
    placeholder: Option<String>,
    /// Whether the select is disabled
    #[props(default)]
    disabled: bool,
    /// Texts, search threshold and id prefix
    #[props(default)]
    config: SelectConfig,
    /// Called with the new value on every commit
    #[props(default)]
    onupdate: EventHandler<OptionValue>,
    /// Called after `onupdate` with the same value
    #[props(default)]
    onchange: EventHandler<OptionValue>,
    /// Called when the manage row is activated
    #[props(default)]
    onmanage: EventHandler<()>,
) -> Element {
    let initial_id = use_hook(|| match id.clone().filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => id_generator(&config.id_prefix).next_id(),
    });
    let mut controller = use_signal(|| SelectController::new(initial_id.clone()));
    let render_tick = use_signal(|| 0u64);

    let mut data = use_hook(|| CopyValue::new(SelectData::default()));
    data.set(SelectData {
        options: options.clone(),
        value: value.clone(),
        disabled,
        search_threshold: config.search_threshold,
    });

    let handle = SelectHandle {
        controller,
        data,
        render_tick,
        onupdate,
        onchange,
        onmanage,
    };

    // A later non-empty id prop replaces the current id
    use_effect(use_reactive((&id,), move |(id,)| {
        if let Some(id) = id {
            controller.write().set_component_id(&id);
        }
    }));

    // Follow the parent's value and option list
    use_effect(use_reactive((&value, &options), move |(_value, _options)| {
        handle.apply(|c, inputs| c.sync(inputs));
    }));

    // After-render continuations: runs once the render that queued them is in the DOM
    use_effect(move || {
        render_tick();
        if !controller.peek().has_pending_render_work() {
            return;
        }
        let effects = handle.apply(|c, inputs| c.take_after_render(inputs));
        handle.apply_dom_effects(effects);
    });

    // Outside-click dismissal: one document listener for the component's lifetime
    let mut click_listener: Signal<Option<DocumentEventListener>> = use_signal(|| None);
    use_effect(move || {
        if click_listener.peek().is_some() {
            return;
        }
        let Some(document) = wasm_utils::document() else {
            return;
        };

        // The listener fires from wasm-bindgen, outside the Dioxus runtime.
        let runtime = Runtime::current();

        let listener = DocumentEventListener::new(document, "click", move |event| {
            let _guard = RuntimeGuard::new(runtime.clone());
            let component_id = match controller.try_peek() {
                Ok(state) if state.is_open() => state.component_id().to_string(),
                _ => return,
            };
            let within_trigger = wasm_utils::event_within(&event, &component_id);
            let within_popup = wasm_utils::event_within(&event, &popup_id(&component_id));
            handle.apply(|c, _| c.outside_click(within_trigger, within_popup));
        });
        click_listener.set(Some(listener));
    });

    use_drop(move || {
        // WORKAROUND: detach from a spawned task. Dropping the JS closure during
        // scope teardown runs bridge IPC inside the diff cycle.
        if let Some(listener) = click_listener.write().take() {
            spawn(async move {
                drop(listener);
            });
        }
    });

    let placeholder = placeholder.unwrap_or_else(|| config.placeholder.clone());

    rsx! {
        SelectView {
            handle,
            options,
            value,
            disabled,
            config,
            placeholder,
        }
    }
}

/// Keys for the visible rows.
///
/// Values of different kinds stay distinct (`1` vs `"1"`); a value repeated
/// in the list falls back to its row position.
fn row_keys(options: &[SelectOption], visible: &[usize]) -> Vec<String> {
    let mut seen = HashSet::new();
    visible
        .iter()
        .enumerate()
        .map(|(row, &index)| {
            let key = format!("{:?}", options[index].value);
            if seen.insert(key.clone()) {
                key
            } else {
                format!("{}#{}", key, row)
            }
        })
        .collect()
}

/// Trigger and popup rendered from the controller's current state
#[component]
fn SelectView(
    handle: SelectHandle,
    options: Vec<SelectOption>,
    value: Option<OptionValue>,
    disabled: bool,
    config: SelectConfig,
    placeholder: String,
) -> Element {
    let inputs = SelectInputs::new(&options, value.as_ref())
        .disabled(disabled)
        .search_threshold(config.search_threshold);

    let (component_id, is_open, active_index, search_query, active_descendant, visible) = {
        let state = handle.controller.read();
        (
            state.component_id().to_string(),
            state.is_open(),
            state.active_index(),
            state.search_query().to_string(),
            state.active_descendant(),
            state.visible(&inputs),
        )
    };
    let selected = inputs.selected().cloned();
    let show_search = inputs.shows_search();
    let show_popup = is_open && !options.is_empty();

    let selected_value = selected.as_ref().map(|option| option.value.clone());
    let rows: Vec<OptionRowData> = visible
        .iter()
        .zip(row_keys(&options, &visible))
        .enumerate()
        .map(|(row, (&index, key))| {
            let option = options[index].clone();
            OptionRowData {
                row,
                key,
                is_selected: selected_value.as_ref() == Some(&option.value),
                option,
            }
        })
        .collect();

    let trigger_content = match selected.as_ref() {
        Some(option) => {
            let label = option.label.clone();
            let description = option.description.clone();
            rsx! {
                span { class: "truncate text-white", "{label}" }
                if let Some(description) = description {
                    span { class: "truncate text-xs text-gray-400", "{description}" }
                }
            }
        }
        None => rsx! {
            span { class: "truncate text-gray-500", "{placeholder}" }
        },
    };

    rsx! {
        div {
            class: "relative w-full",
            "data-state": if is_open { "open" } else { "closed" },
            "data-disabled": if disabled { "true" } else { "false" },

            button {
                id: "{component_id}",
                r#type: "button",
                class: "w-full inline-flex items-center gap-2 text-sm rounded-lg px-3 py-1.5 border border-gray-600 text-gray-300 hover:border-gray-500 hover:bg-gray-700/30 transition-colors focus:outline-none focus:ring-1 focus:ring-accent/50 disabled:opacity-50 disabled:cursor-not-allowed",
                disabled,
                aria_haspopup: "listbox",
                aria_expanded: if is_open { "true" } else { "false" },
                aria_controls: listbox_id(&component_id),
                onclick: move |_| handle.apply(|c, inputs| c.toggle(inputs)),
                onkeydown: move |evt: KeyboardEvent| {
                    let key = select_key(&evt);
                    if handle.apply(|c, inputs| c.trigger_keydown(inputs, key)) {
                        evt.prevent_default();
                    }
                },
                span { class: "flex-1 min-w-0 flex flex-col items-start text-left", {trigger_content} }
                ChevronDownIcon {
                    class: if is_open { "w-4 h-4 text-gray-400 flex-shrink-0 rotate-180 transition-transform" } else { "w-4 h-4 text-gray-400 flex-shrink-0 transition-transform" },
                }
            }

            if show_popup {
                div {
                    id: popup_id(&component_id),
                    class: "absolute left-0 right-0 mt-1 z-20 bg-gray-900 rounded-lg shadow-xl border border-white/5 p-1",

                    if show_search {
                        div { class: "relative mb-1",
                            SearchIcon { class: "w-3.5 h-3.5 text-gray-500 absolute left-2.5 top-1/2 -translate-y-1/2 pointer-events-none" }
                            input {
                                id: search_input_id(&component_id),
                                r#type: "search",
                                autocomplete: "off",
                                class: "w-full bg-gray-800/50 rounded-md pl-8 pr-2.5 py-1.5 text-sm text-gray-300 placeholder-gray-500 focus:outline-none focus:ring-1 focus:ring-accent/50",
                                placeholder: "{config.search_placeholder}",
                                value: "{search_query}",
                                oninput: move |evt: FormEvent| {
                                    handle.apply(|c, inputs| c.set_search_query(inputs, evt.value()));
                                },
                                onkeydown: move |evt: KeyboardEvent| {
                                    let key = select_key(&evt);
                                    if handle.apply(|c, inputs| c.search_keydown(inputs, key)) {
                                        evt.prevent_default();
                                    }
                                },
                            }
                        }
                    }

                    ul {
                        id: listbox_id(&component_id),
                        role: "listbox",
                        tabindex: "-1",
                        aria_activedescendant: active_descendant,
                        class: "max-h-64 overflow-y-auto focus:outline-none",
                        onkeydown: move |evt: KeyboardEvent| {
                            let key = select_key(&evt);
                            if handle.apply(|c, inputs| c.list_keydown(inputs, key)) {
                                evt.prevent_default();
                            }
                        },

                        if rows.is_empty() {
                            li {
                                role: "presentation",
                                class: "px-2.5 py-2 text-xs text-gray-500",
                                "{config.empty_text}"
                            }
                        }
                        for OptionRowData { row , key , is_selected , option } in rows {
                            OptionRow {
                                key: "{key}",
                                id: option_id(&component_id, row),
                                option,
                                is_active: active_index == Some(row),
                                is_selected,
                                onselect: move |option: SelectOption| handle.apply(|c, _| c.select(Some(&option))),
                                onhover: move |_| handle.apply(|c, inputs| c.hover(inputs, row)),
                            }
                        }
                    }

                    div { class: "border-t border-white/5 mt-1 pt-1",
                        button {
                            r#type: "button",
                            class: "w-full flex items-center gap-2 px-2.5 py-1.5 text-xs rounded text-gray-400 hover:bg-gray-700 hover:text-white transition-colors",
                            onclick: move |_| handle.apply(|c, _| c.manage()),
                            SlidersIcon { class: "w-3.5 h-3.5 flex-shrink-0" }
                            "{config.manage_label}"
                        }
                    }
                }
            }
        }
    }
}

struct OptionRowData {
    row: usize,
    key: String,
    is_selected: bool,
    option: SelectOption,
}

/// A single `role=option` row
#[component]
fn OptionRow(
    id: String,
    option: SelectOption,
    is_active: bool,
    is_selected: bool,
    onselect: EventHandler<SelectOption>,
    onhover: EventHandler<()>,
) -> Element {
    let option_for_click = option.clone();

    rsx! {
        li {
            id: "{id}",
            role: "option",
            aria_selected: if is_selected { "true" } else { "false" },
            class: "w-full px-2.5 py-1.5 text-xs rounded cursor-pointer flex items-center gap-2 {row_class(is_active, is_selected)}",
            onclick: move |_| onselect.call(option_for_click.clone()),
            onmouseenter: move |_| onhover.call(()),
            if is_selected {
                CheckIcon { class: "w-3.5 h-3.5 text-indigo-400 flex-shrink-0" }
            } else {
                span { class: "w-3.5 h-3.5 flex-shrink-0" }
            }
            div { class: "flex-1 min-w-0 flex flex-col",
                span { class: "truncate", "{option.label}" }
                if let Some(description) = option.description.as_ref() {
                    span { class: "truncate text-gray-500", "{description}" }
                }
            }
            if let Some(meta) = option.meta.as_ref() {
                span { class: "flex-shrink-0 text-gray-500", "{meta}" }
            }
        }
    }
}

fn row_class(is_active: bool, is_selected: bool) -> &'static str {
    match (is_active, is_selected) {
        (true, _) => "text-white bg-gray-700",
        (false, true) => "text-white bg-gray-700/50",
        (false, false) => "text-gray-200",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use hc_select_common::parse_options;

    type Prepare = fn(&mut SelectController, &SelectInputs<'_>);

    #[derive(Clone)]
    struct Fixture {
        options: Vec<SelectOption>,
        value: Option<OptionValue>,
        prepare: Prepare,
        /// Filled with the view's controller signal on first render
        controller: Rc<Cell<Option<Signal<SelectController>>>>,
    }

    fn fixture_app(fixture: Fixture) -> Element {
        let controller = use_signal(|| {
            let mut controller = SelectController::new("picker");
            let inputs = SelectInputs::new(&fixture.options, fixture.value.as_ref());
            (fixture.prepare)(&mut controller, &inputs);
            controller
        });
        fixture.controller.set(Some(controller));

        let data = use_hook(|| {
            CopyValue::new(SelectData {
                options: fixture.options.clone(),
                value: fixture.value.clone(),
                disabled: false,
                search_threshold: SelectConfig::default().search_threshold,
            })
        });
        let render_tick = use_signal(|| 0u64);
        let handle = SelectHandle {
            controller,
            data,
            render_tick,
            onupdate: EventHandler::default(),
            onchange: EventHandler::default(),
            onmanage: EventHandler::default(),
        };

        rsx! {
            SelectView {
                handle,
                options: fixture.options.clone(),
                value: fixture.value.clone(),
                disabled: false,
                config: SelectConfig::default(),
                placeholder: "Pick one".to_string(),
            }
        }
    }

    fn fixture(options: Vec<SelectOption>, value: Option<OptionValue>, prepare: Prepare) -> Fixture {
        Fixture {
            options,
            value,
            prepare,
            controller: Rc::new(Cell::new(None)),
        }
    }

    fn render(fixture: Fixture) -> (VirtualDom, String) {
        let mut dom = VirtualDom::new_with_props(fixture_app, fixture);
        dom.rebuild_in_place();
        let html = dioxus_ssr::render(&dom);
        (dom, html)
    }

    fn options(n: i64) -> Vec<SelectOption> {
        (1..=n)
            .map(|i| SelectOption::new(i, format!("Option {}", i)))
            .collect()
    }

    /// Opening tag of the element carrying `id`
    fn tag_with_id<'a>(html: &'a str, id: &str) -> &'a str {
        let needle = format!("id=\"{}\"", id);
        let at = html
            .find(&needle)
            .unwrap_or_else(|| panic!("no element with id {} in {}", id, html));
        let start = html[..at].rfind('<').unwrap();
        let end = at + html[at..].find('>').unwrap();
        &html[start..=end]
    }

    fn closed(_: &mut SelectController, _: &SelectInputs<'_>) {}

    fn opened(controller: &mut SelectController, inputs: &SelectInputs<'_>) {
        controller.open(inputs);
        controller.take_after_render(inputs);
    }

    fn opened_with_no_match(controller: &mut SelectController, inputs: &SelectInputs<'_>) {
        opened(controller, inputs);
        controller.set_search_query(inputs, "xyz");
        controller.take_after_render(inputs);
    }

    #[test]
    fn test_closed_trigger_attributes() {
        let (_dom, html) = render(fixture(options(3), None, closed));

        let trigger = tag_with_id(&html, "picker");
        assert!(trigger.starts_with("<button"));
        assert!(trigger.contains("aria-haspopup=\"listbox\""));
        assert!(trigger.contains("aria-expanded=\"false\""));
        assert!(trigger.contains("aria-controls=\"picker-listbox\""));
        assert!(html.contains("Pick one"));
        assert!(!html.contains("role=\"listbox\""));
    }

    #[test]
    fn test_open_marks_selected_and_active_rows() {
        let (_dom, html) = render(fixture(options(3), Some(OptionValue::Int(2)), opened));

        assert!(tag_with_id(&html, "picker").contains("aria-expanded=\"true\""));
        let listbox = tag_with_id(&html, "picker-listbox");
        assert!(listbox.contains("role=\"listbox\""));
        assert!(listbox.contains("tabindex=\"-1\""));
        assert!(listbox.contains("aria-activedescendant=\"picker-option-1\""));

        let selected = tag_with_id(&html, "picker-option-1");
        assert!(selected.contains("role=\"option\""));
        assert!(selected.contains("aria-selected=\"true\""));
        assert!(tag_with_id(&html, "picker-option-0").contains("aria-selected=\"false\""));
        assert!(tag_with_id(&html, "picker-option-2").contains("aria-selected=\"false\""));
    }

    #[test]
    fn test_search_input_only_above_threshold() {
        let (_dom, html) = render(fixture(options(6), None, opened));
        assert!(!html.contains("picker-search"));
        assert!(!html.contains("type=\"search\""));

        let (_dom, html) = render(fixture(options(7), None, opened));
        assert!(tag_with_id(&html, "picker-search").contains("type=\"search\""));
    }

    #[test]
    fn test_no_match_renders_empty_state_row() {
        let (_dom, html) = render(fixture(options(8), None, opened_with_no_match));

        assert!(html.contains("role=\"presentation\""));
        assert!(html.contains("No results found"));
        assert!(!html.contains("role=\"option\""));
        assert!(!tag_with_id(&html, "picker-listbox").contains("aria-activedescendant"));
    }

    #[test]
    fn test_row_keys_keep_value_kinds_apart() {
        let options = parse_options(
            r#"[{"value": 1, "label": "One"}, {"value": "1", "label": "Text one"},
                {"value": true, "label": "Yes"}, {"value": "true", "label": "Text yes"}]"#,
        )
        .unwrap();
        let keys = row_keys(&options, &[0, 1, 2, 3]);
        let unique: HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_row_keys_tolerate_repeated_values() {
        let options = vec![
            SelectOption::new("a", "First"),
            SelectOption::new("a", "Second"),
            SelectOption::new("b", "Third"),
        ];
        let keys = row_keys(&options, &[0, 1, 2]);
        let unique: HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_mixed_value_kinds_survive_rerender() {
        let options = parse_options(
            r#"[{"value": 1, "label": "Number"}, {"value": "1", "label": "Text"},
                {"value": 1, "label": "Repeat"}]"#,
        )
        .unwrap();
        let fixture = fixture(options.clone(), None, opened);
        let cell = fixture.controller.clone();
        let (mut dom, html) = render(fixture);
        assert!(html.contains("aria-activedescendant=\"picker-option-0\""));

        let controller = cell.get().unwrap();
        dom.in_runtime(|| {
            let mut controller = controller;
            let inputs = SelectInputs::new(&options, None);
            controller.write().move_active(&inputs, 1);
        });
        dom.process_events();
        dom.render_immediate_to_vec();

        let html = dioxus_ssr::render(&dom);
        assert!(html.contains("aria-activedescendant=\"picker-option-1\""));
        assert!(html.contains("Number"));
        assert!(html.contains("Text"));
        assert!(html.contains("Repeat"));
    }
}
