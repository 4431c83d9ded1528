//! Lucide icons (https://lucide.dev) used by the select
//!
//! Icons are decorative: they inherit `currentColor` and are hidden from
//! assistive technology. Default size is w-4 h-4, override with `class`.

use dioxus::prelude::*;

/// Chevron down (popup indicator on the trigger)
#[component]
pub fn ChevronDownIcon(#[props(default = "w-4 h-4")] class: &'static str) -> Element {
    rsx! {
        svg {
            class: "{class}",
            xmlns: "http://www.w3.org/2000/svg",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "2",
            stroke_linecap: "round",
            stroke_linejoin: "round",
            aria_hidden: "true",
            path { d: "m6 9 6 6 6-6" }
        }
    }
}

/// Check mark (selected row)
#[component]
pub fn CheckIcon(#[props(default = "w-4 h-4")] class: &'static str) -> Element {
    rsx! {
        svg {
            class: "{class}",
            xmlns: "http://www.w3.org/2000/svg",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "2",
            stroke_linecap: "round",
            stroke_linejoin: "round",
            aria_hidden: "true",
            path { d: "M20 6 9 17l-5-5" }
        }
    }
}

/// Magnifier (search box)
#[component]
pub fn SearchIcon(#[props(default = "w-4 h-4")] class: &'static str) -> Element {
    rsx! {
        svg {
            class: "{class}",
            xmlns: "http://www.w3.org/2000/svg",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "2",
            stroke_linecap: "round",
            stroke_linejoin: "round",
            aria_hidden: "true",
            circle { cx: "11", cy: "11", r: "8" }
            path { d: "m21 21-4.3-4.3" }
        }
    }
}

/// Sliders (manage row)
#[component]
pub fn SlidersIcon(#[props(default = "w-4 h-4")] class: &'static str) -> Element {
    rsx! {
        svg {
            class: "{class}",
            xmlns: "http://www.w3.org/2000/svg",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "2",
            stroke_linecap: "round",
            stroke_linejoin: "round",
            aria_hidden: "true",
            path { d: "M21 4h-7" }
            path { d: "M10 4H3" }
            path { d: "M21 12h-9" }
            path { d: "M8 12H3" }
            path { d: "M21 20h-5" }
            path { d: "M12 20H3" }
            path { d: "M14 2v4" }
            path { d: "M8 10v4" }
            path { d: "M16 18v4" }
        }
    }
}
