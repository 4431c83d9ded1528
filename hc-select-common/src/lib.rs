mod config;
mod error;
mod filter;
mod ids;
mod option;
mod state;

pub use config::{SelectConfig, DEFAULT_SEARCH_THRESHOLD};
pub use error::SelectError;
pub use filter::{
    normalize_query, option_matches, position_of, selected_option, should_show_search,
    visible_indices,
};
pub use ids::{listbox_id, option_id, popup_id, search_input_id, IdGenerator};
pub use option::{parse_options, OptionValue, SelectOption};
pub use state::{
    DomEffect, FocusTarget, Notification, SelectController, SelectInputs, SelectKey,
};
