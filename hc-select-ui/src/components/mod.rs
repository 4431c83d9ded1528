//! Select components

pub mod icons;
pub mod select;

pub use icons::{CheckIcon, ChevronDownIcon, SearchIcon, SlidersIcon};
pub use select::HcSelect;
