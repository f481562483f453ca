//! Keyboard input handling for the TUI.
//!
//! This module translates keyboard events into application state changes.
//! The save, selection, and custom-amount operations all live on `App`; this
//! layer only decides which one a key press means.

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState};
use crate::models::{DiaperType, PRESET_AMOUNTS};

/// Handle a key press. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    // Help overlay swallows everything except its close keys
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return false;
    }

    // Quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return false;
    }

    // Custom amount entry captures text input while open
    if app.selection.custom_open() {
        match key.code {
            KeyCode::Enter => app.on_custom_confirmed(),
            KeyCode::Esc => app.on_custom_toggled(),
            KeyCode::Backspace => app.pop_custom_char(),
            KeyCode::Char(c) => app.push_custom_char(c),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char(c @ '2'..='6') => {
            // Preset keys are the ounce amounts themselves
            if let Some(amount) = c.to_digit(10).map(f64::from) {
                if PRESET_AMOUNTS.contains(&amount) {
                    app.on_amount_picked(amount);
                }
            }
        }
        KeyCode::Char('c') => app.on_custom_toggled(),
        KeyCode::Char('p') => app.on_diaper_picked(DiaperType::Pee),
        KeyCode::Char('o') => app.on_diaper_picked(DiaperType::Poop),
        KeyCode::Char('b') => app.on_diaper_picked(DiaperType::Both),
        KeyCode::Char('s') | KeyCode::Enter => app.on_save_pressed(),
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('q') | KeyCode::Esc => app.state = AppState::ConfirmingQuit,
        _ => {}
    }

    false
}
