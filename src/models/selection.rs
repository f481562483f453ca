//! Selection state for the logging form.
//!
//! `SelectionState` owns the two toggle-selectable categories (feeding amount
//! and diaper type) and the custom-amount affordance. All mutation goes
//! through the operations here so the per-category exclusivity and
//! custom/preset mutual exclusion cannot be violated from the outside.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::utils::format_oz;

use super::entry::{DiaperType, Entry};

/// Fixed preset feeding amounts, in ounces.
pub const PRESET_AMOUNTS: [f64; 5] = [2.0, 3.0, 4.0, 5.0, 6.0];

/// Inclusive bounds for a custom feeding amount, in ounces.
pub const MIN_CUSTOM_OZ: f64 = 0.5;
pub const MAX_CUSTOM_OZ: f64 = 20.0;

/// Prompt shown while nothing is selected.
const EMPTY_SUMMARY: &str = "Select feeding or diaper to continue";

/// A custom amount that failed validation. Zero ounces is rejected along with
/// everything outside the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please enter a valid amount (0.5-20oz)")]
pub struct AmountError;

/// Parse a raw custom-amount entry. Rejects unparsable input and values
/// outside 0.5-20oz (NaN falls out of the range check).
pub fn parse_amount(raw: &str) -> Result<f64, AmountError> {
    let value: f64 = raw.trim().parse().map_err(|_| AmountError)?;
    if !(MIN_CUSTOM_OZ..=MAX_CUSTOM_OZ).contains(&value) {
        return Err(AmountError);
    }
    Ok(value)
}

/// View flags derived from the selection state. A pure projection: equal
/// states produce equal values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub has_selection: bool,
    pub summary_text: String,
    pub save_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    feeding_amount: Option<f64>,
    diaper_type: Option<DiaperType>,
    custom_open: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feeding_amount(&self) -> Option<f64> {
        self.feeding_amount
    }

    pub fn diaper_type(&self) -> Option<DiaperType> {
        self.diaper_type
    }

    pub fn custom_open(&self) -> bool {
        self.custom_open
    }

    /// True when the selected amount came from the custom affordance rather
    /// than a preset button.
    pub fn is_custom_amount(&self) -> bool {
        self.feeding_amount
            .map(|v| !PRESET_AMOUNTS.contains(&v))
            .unwrap_or(false)
    }

    /// Pick a preset amount. Re-picking the current amount deselects it.
    /// Any open custom affordance closes either way.
    pub fn select_amount(&mut self, value: f64) {
        self.custom_open = false;
        self.feeding_amount = if self.feeding_amount == Some(value) {
            None
        } else {
            Some(value)
        };
    }

    /// Open or close the custom-amount affordance. Both directions clear the
    /// feeding slot: opening drops any preset, closing abandons the entry.
    pub fn toggle_custom_input(&mut self) {
        self.custom_open = !self.custom_open;
        self.feeding_amount = None;
    }

    /// Validate and apply a custom amount. On success the affordance closes
    /// and the parsed value takes the feeding slot; on failure nothing
    /// changes.
    pub fn confirm_custom_amount(&mut self, raw: &str) -> Result<f64, AmountError> {
        let value = parse_amount(raw)?;
        self.feeding_amount = Some(value);
        self.custom_open = false;
        Ok(value)
    }

    /// Pick a diaper type. Re-picking the current type deselects it.
    pub fn select_diaper_type(&mut self, kind: DiaperType) {
        self.diaper_type = if self.diaper_type == Some(kind) {
            None
        } else {
            Some(kind)
        };
    }

    /// Reset both categories and close the custom affordance.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn ui_state(&self) -> UiState {
        let has_selection = self.feeding_amount.is_some() || self.diaper_type.is_some();

        let summary_text = if has_selection {
            let mut parts = Vec::new();
            if let Some(amount) = self.feeding_amount {
                parts.push(format!("🍼 {}oz", format_oz(amount)));
            }
            if let Some(kind) = self.diaper_type {
                parts.push(kind.label().to_string());
            }
            parts.join(" + ")
        } else {
            EMPTY_SUMMARY.to_string()
        };

        UiState {
            has_selection,
            summary_text,
            save_enabled: has_selection,
        }
    }

    /// Build the submission payload for the current selections, or None when
    /// nothing is selected.
    pub fn entry_at(&self, timestamp: DateTime<Utc>) -> Option<Entry> {
        if self.feeding_amount.is_none() && self.diaper_type.is_none() {
            return None;
        }
        Some(Entry::new(timestamp, self.feeding_amount, self.diaper_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_select_amount_toggles_off_on_repeat() {
        let mut state = SelectionState::new();
        state.select_amount(4.0);
        assert_eq!(state.feeding_amount(), Some(4.0));
        state.select_amount(4.0);
        assert_eq!(state.feeding_amount(), None);
    }

    #[test]
    fn test_select_amount_replaces_previous() {
        let mut state = SelectionState::new();
        state.select_amount(2.0);
        state.select_amount(5.0);
        assert_eq!(state.feeding_amount(), Some(5.0));
    }

    #[test]
    fn test_select_diaper_toggles_off_on_repeat() {
        let mut state = SelectionState::new();
        state.select_diaper_type(DiaperType::Pee);
        assert_eq!(state.diaper_type(), Some(DiaperType::Pee));
        state.select_diaper_type(DiaperType::Pee);
        assert_eq!(state.diaper_type(), None);
    }

    #[test]
    fn test_categories_are_independent() {
        let mut state = SelectionState::new();
        state.select_amount(3.0);
        state.select_diaper_type(DiaperType::Both);
        assert_eq!(state.feeding_amount(), Some(3.0));
        assert_eq!(state.diaper_type(), Some(DiaperType::Both));

        state.select_diaper_type(DiaperType::Poop);
        assert_eq!(state.feeding_amount(), Some(3.0));
        assert_eq!(state.diaper_type(), Some(DiaperType::Poop));
    }

    #[test]
    fn test_opening_custom_clears_preset() {
        let mut state = SelectionState::new();
        state.select_amount(4.0);
        state.toggle_custom_input();
        assert!(state.custom_open());
        assert_eq!(state.feeding_amount(), None);
    }

    #[test]
    fn test_closing_custom_without_confirm_clears_amount() {
        let mut state = SelectionState::new();
        state.toggle_custom_input();
        state.toggle_custom_input();
        assert!(!state.custom_open());
        assert_eq!(state.feeding_amount(), None);
    }

    #[test]
    fn test_selecting_preset_closes_custom() {
        let mut state = SelectionState::new();
        state.toggle_custom_input();
        state.select_amount(2.0);
        assert!(!state.custom_open());
        assert_eq!(state.feeding_amount(), Some(2.0));
    }

    #[test]
    fn test_confirm_custom_amount_accepts_valid() {
        let mut state = SelectionState::new();
        state.toggle_custom_input();
        assert_eq!(state.confirm_custom_amount("3.5"), Ok(3.5));
        assert!(!state.custom_open());
        assert_eq!(state.feeding_amount(), Some(3.5));
        assert!(state.is_custom_amount());
    }

    #[test]
    fn test_confirm_custom_amount_rejections_leave_state_unchanged() {
        let mut state = SelectionState::new();
        state.toggle_custom_input();

        for raw in ["0.3", "25", "abc", "", "0", "-1", "NaN"] {
            assert_eq!(state.confirm_custom_amount(raw), Err(AmountError), "input {raw:?}");
            assert!(state.custom_open(), "input {raw:?}");
            assert_eq!(state.feeding_amount(), None, "input {raw:?}");
        }
    }

    #[test]
    fn test_confirm_custom_amount_accepts_bounds() {
        let mut state = SelectionState::new();
        assert_eq!(state.confirm_custom_amount("0.5"), Ok(0.5));
        assert_eq!(state.confirm_custom_amount("20"), Ok(20.0));
    }

    #[test]
    fn test_ui_state_empty() {
        let state = SelectionState::new();
        let ui = state.ui_state();
        assert!(!ui.has_selection);
        assert!(!ui.save_enabled);
        assert_eq!(ui.summary_text, "Select feeding or diaper to continue");
    }

    #[test]
    fn test_ui_state_summary_fragments() {
        let mut state = SelectionState::new();
        state.select_amount(4.0);
        assert_eq!(state.ui_state().summary_text, "🍼 4oz");

        state.select_diaper_type(DiaperType::Poop);
        assert_eq!(state.ui_state().summary_text, "🍼 4oz + 💩 Poop");

        state.select_amount(4.0);
        assert_eq!(state.ui_state().summary_text, "💩 Poop");
    }

    #[test]
    fn test_ui_state_is_pure() {
        let mut state = SelectionState::new();
        state.select_amount(3.0);
        state.select_diaper_type(DiaperType::Pee);
        assert_eq!(state.ui_state(), state.ui_state());

        let copy = state.clone();
        assert_eq!(copy.ui_state(), state.ui_state());
    }

    #[test]
    fn test_entry_at_requires_a_selection() {
        let state = SelectionState::new();
        let ts = Utc.with_ymd_and_hms(2026, 8, 6, 8, 0, 0).unwrap();
        assert_eq!(state.entry_at(ts), None);
    }

    #[test]
    fn test_entry_at_carries_selections() {
        let mut state = SelectionState::new();
        state.select_amount(4.0);
        state.select_diaper_type(DiaperType::Poop);

        let ts = Utc.with_ymd_and_hms(2026, 8, 6, 8, 0, 0).unwrap();
        let entry = state.entry_at(ts).unwrap();
        assert_eq!(entry.feeding.as_ref().unwrap().amount, 4.0);
        assert_eq!(entry.feeding.as_ref().unwrap().unit, "oz");
        assert_eq!(entry.diaper.as_ref().unwrap().kind, DiaperType::Poop);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut state = SelectionState::new();
        state.select_amount(6.0);
        state.select_diaper_type(DiaperType::Both);
        state.clear();
        assert_eq!(state, SelectionState::new());
    }
}
