//! hc-select-ui - Dioxus views for the hc-select combobox
//!
//! The component is a thin view over `hc_select_common::SelectController`;
//! the option model and configuration are re-exported so apps only need
//! this crate.

pub mod components;
pub mod wasm_utils;

pub use components::*;
pub use hc_select_common::{
    parse_options, IdGenerator, OptionValue, SelectConfig, SelectError, SelectOption,
};
