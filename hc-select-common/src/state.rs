//! Select state machine
//!
//! [`SelectController`] owns the transient popup state (open flag, highlighted
//! row, search text) and turns pointer and keyboard input into state changes.
//! It never touches the DOM or the parent's data directly:
//!
//! - Outgoing events are queued as [`Notification`]s and drained by the view
//!   with [`SelectController::take_notifications`].
//! - Work that needs the rendered DOM (focusing, scrolling a row into view,
//!   highlight defaults that depend on the freshly rendered list) is queued
//!   as an after-render continuation and executed by
//!   [`SelectController::take_after_render`], which the view must only call
//!   once the DOM reflects the current state.
//!
//! The highlight is kept as an index into the *visible* rows and is always
//! `None` while the popup is closed.

use tracing::{debug, trace};

use crate::filter::{position_of, selected_option, should_show_search, visible_indices};
use crate::ids::option_id;
use crate::{OptionValue, SelectOption, DEFAULT_SEARCH_THRESHOLD};

/// Parent-owned data the controller reads on every transition
#[derive(Clone, Copy, Debug)]
pub struct SelectInputs<'a> {
    pub options: &'a [SelectOption],
    pub value: Option<&'a OptionValue>,
    pub disabled: bool,
    pub search_threshold: usize,
}

impl<'a> SelectInputs<'a> {
    pub fn new(options: &'a [SelectOption], value: Option<&'a OptionValue>) -> Self {
        Self {
            options,
            value,
            disabled: false,
            search_threshold: DEFAULT_SEARCH_THRESHOLD,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn search_threshold(mut self, threshold: usize) -> Self {
        self.search_threshold = threshold;
        self
    }

    pub fn shows_search(&self) -> bool {
        should_show_search(self.options, self.search_threshold)
    }

    pub fn selected(&self) -> Option<&'a SelectOption> {
        selected_option(self.options, self.value)
    }
}

/// Keys the select reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectKey {
    ArrowDown,
    ArrowUp,
    Home,
    End,
    Enter,
    Space,
    Escape,
    Tab,
    Other,
}

/// Element that should receive keyboard focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    Trigger,
    SearchInput,
    Listbox,
}

/// DOM work to perform after the next render
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomEffect {
    Focus(FocusTarget),
    /// Scroll the visible row at this index into view (nearest edge)
    ScrollIntoView(usize),
}

/// Events emitted to the parent
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    /// New selected value (two-way binding update)
    ValueChanged(OptionValue),
    /// Same value, for listeners that only care about user commits
    Change(OptionValue),
    /// The secondary "manage" row was activated
    Manage,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum AfterRender {
    /// Highlight the selection (or first row) and focus the popup
    Opened,
    /// Default the highlight once the filtered rows are rendered
    SearchChanged,
    Dom(DomEffect),
}

#[derive(Debug)]
pub struct SelectController {
    component_id: String,
    is_open: bool,
    active_index: Option<usize>,
    search_query: String,
    /// Values of the visible rows as of the last synchronization
    visible_values: Vec<OptionValue>,
    /// Selected value as of the last synchronization
    last_value: Option<OptionValue>,
    after_render: Vec<AfterRender>,
    notifications: Vec<Notification>,
}

impl SelectController {
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            is_open: false,
            active_index: None,
            search_query: String::new(),
            visible_values: Vec::new(),
            last_value: None,
            after_render: Vec::new(),
            notifications: Vec::new(),
        }
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    /// Replace the component id. Empty ids are ignored.
    pub fn set_component_id(&mut self, id: &str) {
        if !id.is_empty() && id != self.component_id {
            self.component_id = id.to_string();
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Indices into `inputs.options` of the rows currently shown
    pub fn visible(&self, inputs: &SelectInputs<'_>) -> Vec<usize> {
        visible_indices(inputs.options, &self.search_query, inputs.search_threshold)
    }

    /// Id of the highlighted row, for `aria-activedescendant`
    pub fn active_descendant(&self) -> Option<String> {
        self.active_index
            .map(|index| option_id(&self.component_id, index))
    }

    // =========================================================================
    // Open / close
    // =========================================================================

    /// Open the popup. Returns whether the state changed.
    pub fn open(&mut self, inputs: &SelectInputs<'_>) -> bool {
        if inputs.disabled || inputs.options.is_empty() {
            trace!("Select {} ignored open: disabled or empty", self.component_id);
            return false;
        }
        if self.is_open {
            return false;
        }
        self.search_query.clear();
        self.is_open = true;
        self.last_value = inputs.value.cloned();
        self.visible_values = self.visible_values_for(inputs);
        self.after_render.push(AfterRender::Opened);
        debug!("Select {} opened", self.component_id);
        true
    }

    /// Close the popup, optionally handing focus back to the trigger.
    /// Returns whether the state changed.
    pub fn close(&mut self, restore_focus: bool) -> bool {
        if !self.is_open {
            return false;
        }
        self.is_open = false;
        self.active_index = None;
        self.search_query.clear();
        self.visible_values.clear();
        if restore_focus {
            self.defer(DomEffect::Focus(FocusTarget::Trigger));
        }
        debug!("Select {} closed", self.component_id);
        true
    }

    pub fn toggle(&mut self, inputs: &SelectInputs<'_>) {
        if self.is_open {
            self.close(true);
        } else {
            self.open(inputs);
        }
    }

    // =========================================================================
    // Highlight
    // =========================================================================

    fn set_active(&mut self, index: Option<usize>) {
        self.active_index = index;
        if let Some(index) = index {
            self.defer(DomEffect::ScrollIntoView(index));
        }
    }

    fn set_active_by_value(&mut self, inputs: &SelectInputs<'_>, value: Option<&OptionValue>) {
        let visible = self.visible(inputs);
        self.set_active(position_of(inputs.options, &visible, value));
    }

    /// Move the highlight circularly over the visible rows.
    ///
    /// Without a highlight, a positive direction lands on the first row and a
    /// negative one on the last.
    pub fn move_active(&mut self, inputs: &SelectInputs<'_>, direction: isize) {
        let count = self.visible(inputs).len();
        if count == 0 {
            return;
        }
        let next = match self.active_index {
            None if direction > 0 => 0,
            None => count - 1,
            Some(current) => (current as isize + direction).rem_euclid(count as isize) as usize,
        };
        trace!("Select {} highlight -> {}", self.component_id, next);
        self.set_active(Some(next));
    }

    pub fn move_to_first(&mut self, inputs: &SelectInputs<'_>) {
        if !self.visible(inputs).is_empty() {
            self.set_active(Some(0));
        }
    }

    pub fn move_to_last(&mut self, inputs: &SelectInputs<'_>) {
        let count = self.visible(inputs).len();
        if count > 0 {
            self.set_active(Some(count - 1));
        }
    }

    /// Pointer entered the visible row at `index`
    pub fn hover(&mut self, inputs: &SelectInputs<'_>, index: usize) {
        if self.is_open && index < self.visible(inputs).len() && self.active_index != Some(index) {
            self.set_active(Some(index));
        }
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Commit `option` as the new value. `None` is ignored.
    pub fn select(&mut self, option: Option<&SelectOption>) {
        let Some(option) = option else {
            return;
        };
        debug!("Select {} committed {}", self.component_id, option.value);
        self.notifications
            .push(Notification::ValueChanged(option.value.clone()));
        self.notifications
            .push(Notification::Change(option.value.clone()));
        self.close(true);
    }

    /// Commit the highlighted row, if any. Returns whether a row was committed.
    pub fn commit_active(&mut self, inputs: &SelectInputs<'_>) -> bool {
        let visible = self.visible(inputs);
        let option = self
            .active_index
            .and_then(|active| visible.get(active))
            .map(|&i| &inputs.options[i]);
        let committed = option.is_some();
        self.select(option);
        committed
    }

    /// Activate the secondary "manage" row
    pub fn manage(&mut self) {
        debug!("Select {} manage action", self.component_id);
        self.notifications.push(Notification::Manage);
        self.close(true);
    }

    // =========================================================================
    // Search
    // =========================================================================

    pub fn set_search_query(&mut self, inputs: &SelectInputs<'_>, query: impl Into<String>) {
        self.search_query = query.into();
        self.sync_visible(inputs);
        self.after_render.push(AfterRender::SearchChanged);
    }

    // =========================================================================
    // Re-synchronization with parent data
    // =========================================================================

    /// Re-apply both synchronization rules after the parent's props changed
    pub fn sync(&mut self, inputs: &SelectInputs<'_>) {
        self.sync_value(inputs);
        self.sync_visible(inputs);
    }

    /// Follow an externally changed selected value with the highlight
    pub fn sync_value(&mut self, inputs: &SelectInputs<'_>) {
        if self.last_value.as_ref() == inputs.value {
            return;
        }
        self.last_value = inputs.value.cloned();
        if !self.is_open {
            return;
        }
        match inputs.value {
            None => self.set_active(None),
            Some(value) => self.set_active_by_value(inputs, Some(value)),
        }
    }

    /// Keep the highlight valid after the visible rows changed
    pub fn sync_visible(&mut self, inputs: &SelectInputs<'_>) {
        let current = self.visible_values_for(inputs);
        if current == self.visible_values {
            return;
        }
        self.visible_values = current;
        if !self.is_open {
            return;
        }

        let count = self.visible_values.len();
        if count == 0 {
            self.active_index = None;
            return;
        }
        match self.active_index {
            Some(active) if active >= count => {
                self.active_index = Some(count - 1);
            }
            Some(_) => {}
            None => {
                self.set_active_by_value(inputs, inputs.selected().map(|o| &o.value));
                if self.active_index.is_none() {
                    self.set_active(Some(0));
                }
            }
        }
    }

    fn visible_values_for(&self, inputs: &SelectInputs<'_>) -> Vec<OptionValue> {
        self.visible(inputs)
            .into_iter()
            .map(|i| inputs.options[i].value.clone())
            .collect()
    }

    // =========================================================================
    // Input handlers
    // =========================================================================

    /// Key pressed on the trigger button. Returns whether to prevent the
    /// browser default.
    pub fn trigger_keydown(&mut self, inputs: &SelectInputs<'_>, key: SelectKey) -> bool {
        match key {
            SelectKey::ArrowDown | SelectKey::ArrowUp => {
                if !self.is_open {
                    self.open(inputs);
                } else {
                    let direction = if key == SelectKey::ArrowDown { 1 } else { -1 };
                    self.move_active(inputs, direction);
                }
                true
            }
            SelectKey::Enter | SelectKey::Space => {
                if !self.is_open {
                    self.open(inputs);
                } else {
                    self.commit_active(inputs);
                }
                true
            }
            SelectKey::Escape if self.is_open => {
                self.close(false);
                true
            }
            _ => false,
        }
    }

    /// Key pressed while the listbox has focus
    pub fn list_keydown(&mut self, inputs: &SelectInputs<'_>, key: SelectKey) -> bool {
        match key {
            SelectKey::ArrowDown => self.move_active(inputs, 1),
            SelectKey::ArrowUp => self.move_active(inputs, -1),
            SelectKey::Home => self.move_to_first(inputs),
            SelectKey::End => self.move_to_last(inputs),
            SelectKey::Enter | SelectKey::Space => {
                self.commit_active(inputs);
            }
            SelectKey::Escape => {
                self.close(true);
            }
            // Tab keeps its default so focus moves on naturally.
            // TODO: decide whether Tab should restore trigger focus like the other close paths
            SelectKey::Tab => {
                self.close(false);
                return false;
            }
            SelectKey::Other => return false,
        }
        true
    }

    /// Key pressed inside the search input
    pub fn search_keydown(&mut self, inputs: &SelectInputs<'_>, key: SelectKey) -> bool {
        match key {
            SelectKey::ArrowDown => {
                self.move_to_first(inputs);
                self.focus_list_if_visible(inputs);
                true
            }
            SelectKey::ArrowUp => {
                self.move_to_last(inputs);
                self.focus_list_if_visible(inputs);
                true
            }
            SelectKey::Enter => {
                self.commit_active(inputs);
                true
            }
            SelectKey::Escape if !self.search_query.is_empty() => {
                self.set_search_query(inputs, String::new());
                true
            }
            SelectKey::Escape => {
                self.close(true);
                false
            }
            _ => false,
        }
    }

    fn focus_list_if_visible(&mut self, inputs: &SelectInputs<'_>) {
        if !self.visible(inputs).is_empty() {
            self.defer(DomEffect::Focus(FocusTarget::Listbox));
        }
    }

    /// A click landed somewhere in the document
    pub fn outside_click(&mut self, within_trigger: bool, within_popup: bool) {
        if !self.is_open || within_trigger || within_popup {
            return;
        }
        trace!("Select {} dismissed by outside click", self.component_id);
        self.close(false);
    }

    // =========================================================================
    // Queues
    // =========================================================================

    fn defer(&mut self, effect: DomEffect) {
        self.after_render.push(AfterRender::Dom(effect));
    }

    /// Whether [`take_after_render`](Self::take_after_render) has work queued
    pub fn has_pending_render_work(&self) -> bool {
        !self.after_render.is_empty()
    }

    /// Run queued continuations against the current state and return the DOM
    /// effects to apply. Call only after the view rendered the current state.
    pub fn take_after_render(&mut self, inputs: &SelectInputs<'_>) -> Vec<DomEffect> {
        let mut effects = Vec::new();
        while !self.after_render.is_empty() {
            for item in std::mem::take(&mut self.after_render) {
                match item {
                    AfterRender::Opened if self.is_open => {
                        match inputs.selected() {
                            Some(selected) => {
                                self.set_active_by_value(inputs, Some(&selected.value))
                            }
                            None => {
                                let any = !self.visible(inputs).is_empty();
                                self.set_active(any.then_some(0));
                            }
                        }
                        let target = if inputs.shows_search() {
                            FocusTarget::SearchInput
                        } else {
                            FocusTarget::Listbox
                        };
                        self.defer(DomEffect::Focus(target));
                    }
                    AfterRender::SearchChanged if self.is_open => {
                        if self.visible(inputs).is_empty() {
                            self.active_index = None;
                        } else if self.active_index.is_none() {
                            self.set_active(Some(0));
                        }
                    }
                    AfterRender::Opened | AfterRender::SearchChanged => {}
                    AfterRender::Dom(effect) => effects.push(effect),
                }
            }
        }
        effects
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
