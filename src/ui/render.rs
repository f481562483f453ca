use chrono::{Local, Timelike};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState};
use crate::models::{DiaperType, PRESET_AMOUNTS};
use crate::utils::{clock_line, format_oz, DayPart};

use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header: greeting + clock
            Constraint::Length(4), // Feeding buttons
            Constraint::Length(3), // Diaper buttons
            Constraint::Length(3), // Selection summary
            Constraint::Length(3), // Save control
            Constraint::Min(0),    // Filler
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_feeding(frame, app, chunks[1]);
    render_diaper(frame, app, chunks[2]);
    render_summary(frame, app, chunks[3]);
    render_save(frame, app, chunks[4]);
    render_status_bar(frame, app, chunks[6]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }

    if let Some(ref toast) = app.toast {
        render_toast(frame, toast.is_error, &toast.message);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let now = Local::now();
    let part = DayPart::from_hour(now.hour());

    let greeting = Line::from(vec![
        Span::raw(" "),
        Span::raw(part.icon()),
        Span::raw(" "),
        Span::styled(part.greeting(), styles::title_style()),
    ]);
    let clock = Line::from(Span::styled(
        format!(" {}", clock_line(&now)),
        styles::muted_style(),
    ));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::border_style());
    frame.render_widget(Paragraph::new(vec![greeting, clock]).block(block), area);
}

fn render_feeding(frame: &mut Frame, app: &App, area: Rect) {
    let mut presets = vec![Span::raw(" ")];
    for (i, amount) in PRESET_AMOUNTS.iter().enumerate() {
        if i > 0 {
            presets.push(Span::raw("  "));
        }
        let label = format!("[{oz}oz]", oz = format_oz(*amount));
        let selected =
            app.selection.feeding_amount() == Some(*amount) && !app.selection.custom_open();
        let style = if selected {
            styles::selected_style()
        } else {
            styles::button_style()
        };
        presets.push(Span::styled(label, style));
    }

    let custom_row = if app.selection.custom_open() {
        Line::from(vec![
            Span::raw(" "),
            Span::styled("Custom (oz): ", styles::highlight_style()),
            Span::styled(format!("{}▏", app.custom_input), styles::button_style()),
            Span::styled("  [Enter] confirm  [Esc] cancel", styles::muted_style()),
        ])
    } else {
        let selected = app.selection.is_custom_amount();
        let style = if selected {
            styles::selected_style()
        } else {
            styles::button_style()
        };
        Line::from(vec![Span::raw(" "), Span::styled("[c] Custom...", style)])
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style())
        .title(Span::styled(" 🍼 Feeding ", styles::title_style()));
    frame.render_widget(
        Paragraph::new(vec![Line::from(presets), custom_row]).block(block),
        area,
    );
}

fn render_diaper(frame: &mut Frame, app: &App, area: Rect) {
    let buttons = [
        ('p', DiaperType::Pee),
        ('o', DiaperType::Poop),
        ('b', DiaperType::Both),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, kind)) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let label = format!("[{key}] {}", kind.label());
        let style = if app.selection.diaper_type() == Some(*kind) {
            styles::selected_style()
        } else {
            styles::button_style()
        };
        spans.push(Span::styled(label, style));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style())
        .title(Span::styled(" Diaper ", styles::title_style()));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let ui = app.ui_state();
    let style = if ui.has_selection {
        styles::highlight_style()
    } else {
        styles::muted_style()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style());
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {}", ui.summary_text),
            style,
        )))
        .block(block),
        area,
    );
}

fn render_save(frame: &mut Frame, app: &App, area: Rect) {
    let ui = app.ui_state();
    let (label, style) = if app.saving {
        (" ⏳ Saving...".to_string(), styles::highlight_style())
    } else {
        (" [s] Save Entry".to_string(), styles::save_style(ui.save_enabled))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style());
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(label, style))).block(block),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = format!(" {} ", app.cache_status.describe());
    let right_text = " [?] help | [q] quit ";

    let padding = (area.width as usize)
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());
    let line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    frame.render_widget(Paragraph::new(line).style(styles::status_bar_style()), area);
}

fn render_toast(frame: &mut Frame, is_error: bool, message: &str) {
    let icon = if is_error { "✗" } else { "✓" };
    let text = format!(" {icon} {message} ");

    let width = (text.chars().count() as u16 + 2).min(frame.area().width.saturating_sub(4));
    let area = Rect {
        x: frame.area().width.saturating_sub(width) / 2,
        y: frame.area().height.saturating_sub(5),
        width,
        height: 3,
    };

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .style(styles::toast_style(is_error));
    frame.render_widget(
        Paragraph::new(Line::from(Span::raw(text))).block(block),
        area,
    );
}

fn render_help_overlay(frame: &mut Frame) {
    let keys = [
        ("2-6", "pick a preset amount"),
        ("c", "custom amount"),
        ("p / o / b", "diaper: pee / poop / both"),
        ("s", "save entry"),
        ("?", "toggle this help"),
        ("q", "quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{key:<10}"), styles::help_key_style()),
            Span::styled(desc, styles::help_desc_style()),
        ]));
    }

    let area = centered_rect(frame.area(), 44, lines.len() as u16 + 2);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style())
        .title(Span::styled(" Help ", styles::title_style()));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect(frame.area(), 30, 3);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style());
    frame.render_widget(
        Paragraph::new(Line::from(" Quit? [y/n]")).block(block),
        area,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
