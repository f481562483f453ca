// Allow dead code: Style functions defined for consistent UI
#![allow(dead_code)]

use ratatui::style::{Color, Modifier, Style};

// Color palette
pub const PRIMARY: Color = Color::Rgb(192, 128, 160);
pub const SECONDARY: Color = Color::Rgb(96, 160, 96);
pub const ACCENT: Color = Color::Rgb(192, 160, 64);
pub const ERROR: Color = Color::Rgb(192, 64, 64);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const HIGHLIGHT: Color = Color::Rgb(64, 48, 56);

// Styles
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn button_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn selected_style() -> Style {
    Style::default()
        .fg(PRIMARY)
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::default().fg(SECONDARY)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn border_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn save_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(SECONDARY)
            .add_modifier(Modifier::BOLD)
    } else {
        muted_style()
    }
}

pub fn toast_style(is_error: bool) -> Style {
    if is_error {
        Style::default().fg(Color::White).bg(ERROR)
    } else {
        Style::default().fg(Color::White).bg(Color::Rgb(48, 96, 48))
    }
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(40, 32, 36)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}
