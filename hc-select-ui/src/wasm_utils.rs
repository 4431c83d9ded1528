//! Browser interop for the select view: the outside-click subscription,
//! focus and scroll-into-view by element id.

use wasm_bindgen_x::prelude::*;
use wasm_bindgen_x::JsCast;

/// A document-level event subscription, released when dropped.
pub struct DocumentEventListener {
    document: web_sys_x::Document,
    event_name: &'static str,
    callback: Closure<dyn FnMut(web_sys_x::Event)>,
}

impl DocumentEventListener {
    pub fn new(
        document: web_sys_x::Document,
        event_name: &'static str,
        callback: impl FnMut(web_sys_x::Event) + 'static,
    ) -> Self {
        let callback: Closure<dyn FnMut(web_sys_x::Event)> = Closure::wrap(Box::new(callback));

        if document
            .add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref())
            .is_err()
        {
            tracing::warn!("Failed to attach document {} listener", event_name);
        }

        Self {
            document,
            event_name,
            callback,
        }
    }
}

impl Drop for DocumentEventListener {
    fn drop(&mut self) {
        let _ = self.document.remove_event_listener_with_callback(
            self.event_name,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

pub fn document() -> Option<web_sys_x::Document> {
    web_sys_x::window()?.document()
}

fn element_by_id(id: &str) -> Option<web_sys_x::Element> {
    document()?.get_element_by_id(id)
}

/// Whether the event's target sits inside the element with `element_id`.
/// Unmounted elements contain nothing.
pub fn event_within(event: &web_sys_x::Event, element_id: &str) -> bool {
    let Some(target) = event
        .target()
        .and_then(|target| target.dyn_into::<web_sys_x::Node>().ok())
    else {
        return false;
    };
    element_by_id(element_id).is_some_and(|element| element.contains(Some(&target)))
}

/// Focus an element without scrolling the page
pub fn focus_element(id: &str) {
    let Some(element) = element_by_id(id)
        .and_then(|element| element.dyn_into::<web_sys_x::HtmlElement>().ok())
    else {
        return;
    };
    let options = web_sys_x::FocusOptions::new();
    options.set_prevent_scroll(true);
    let _ = element.focus_with_options(&options);
}

/// Scroll an element into view, moving as little as possible
pub fn scroll_into_view_nearest(id: &str) {
    let Some(element) = element_by_id(id) else {
        return;
    };
    let options = web_sys_x::ScrollIntoViewOptions::new();
    options.set_block(web_sys_x::ScrollLogicalPosition::Nearest);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}
