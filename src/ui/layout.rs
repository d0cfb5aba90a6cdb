//! Screen layout and status bar

use crate::platform::{REFRESH_SHORTCUT, SUBMIT_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into form area, side panel, and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(32)])
        .split(vertical[0]);

    (horizontal[0], horizontal[1], vertical[1])
}

/// Draw the status bar: a transient message if one is set, key hints otherwise
pub fn draw_status_bar(frame: &mut Frame, area: Rect, status_message: Option<&str>) {
    let line = match status_message {
        Some(message) => Line::from(Span::styled(message, Style::default().fg(Color::Yellow))),
        None => Line::from(vec![
            hint_key("Tab"),
            hint_text(": field  "),
            hint_key("◂ ▸"),
            hint_text(": template  "),
            hint_key("Ctrl+N/D"),
            hint_text(": add/remove entry  "),
            hint_key(SUBMIT_SHORTCUT),
            hint_text(": run  "),
            hint_key(REFRESH_SHORTCUT),
            hint_text(": refresh  "),
            hint_key("Ctrl+C"),
            hint_text(": quit"),
        ]),
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn hint_key(key: &str) -> Span<'_> {
    Span::styled(key, Style::default().fg(Color::Cyan))
}

fn hint_text(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().fg(Color::DarkGray))
}
