//! Server context and submission history panel

use crate::state::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(area);

    draw_context(frame, chunks[0], state);
    draw_history(frame, chunks[1], state);
}

fn draw_context(frame: &mut Frame, area: Rect, state: &AppState) {
    let connection = if state.server_connected {
        Span::styled("● Connected", Style::default().fg(Color::Green))
    } else {
        Span::styled("○ Offline", Style::default().fg(Color::Red))
    };

    let database = match (&state.database_label, state.database_id) {
        (Some(label), Some(id)) => format!("{label} (#{id})"),
        (None, Some(id)) => format!("#{id}"),
        _ => "not configured".to_string(),
    };
    let schema = state.schema.clone().unwrap_or_else(|| "not configured".to_string());

    let lines = vec![
        Line::from(connection),
        Line::from(Span::styled(
            state.server_url.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled("database: ", Style::default().fg(Color::DarkGray)),
            Span::raw(database),
        ]),
        Line::from(vec![
            Span::styled("schema:   ", Style::default().fg(Color::DarkGray)),
            Span::raw(schema),
        ]),
    ];

    let block = Block::default()
        .title(" Server ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_history(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Recent datasets ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner_height = block.inner(area).height as usize;

    let lines: Vec<Line> = if state.history.is_empty() {
        vec![Line::from(Span::styled(
            "none yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        // Latest first
        state
            .history
            .iter()
            .rev()
            .take(inner_height.max(1))
            .map(|record| {
                Line::from(vec![
                    Span::styled(
                        record.created_at.format("%H:%M ").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        record.dataset_name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(" #{}", record.dataset_id),
                        Style::default().fg(Color::Cyan),
                    ),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
