//! Data models for logged events.
//!
//! - `SelectionState`: the in-progress form state (feeding amount, diaper
//!   type, custom-amount affordance) with its toggle/exclusivity rules
//! - `Entry`: the JSON payload submitted to the webhook
//! - `UiState`: view flags derived from the selection state

pub mod entry;
pub mod selection;

pub use entry::{Diaper, DiaperType, Entry, Feeding};
pub use selection::{
    AmountError, SelectionState, UiState, MAX_CUSTOM_OZ, MIN_CUSTOM_OZ, PRESET_AMOUNTS,
};
