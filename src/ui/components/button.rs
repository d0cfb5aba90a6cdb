//! Action button component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render a bordered action button
pub fn render_action_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    focused: bool,
    enabled: bool,
    accent: Color,
) {
    let border_color = if !enabled {
        Color::DarkGray
    } else if focused {
        accent
    } else {
        Color::Gray
    };

    let mut label_style = Style::default().fg(border_color);
    if focused && enabled {
        label_style = label_style.add_modifier(Modifier::BOLD);
    }

    let button = Paragraph::new(Line::from(Span::styled(label, label_style)))
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );

    frame.render_widget(button, area);
}
