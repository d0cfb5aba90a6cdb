//! Dataset submission dialog

use super::base::{render_dialog, DialogConfig};
use crate::state::SubmitStatus;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

/// Render the submit dialog for the current submission status
///
/// The in-flight state carries no hint because it cannot be dismissed.
pub fn render_submit_dialog(frame: &mut Frame, status: &SubmitStatus) {
    match status {
        SubmitStatus::Idle => {}
        SubmitStatus::InFlight => render_dialog(
            frame,
            DialogConfig {
                title: "Creating dataset",
                color: Color::Yellow,
                message: "Generating dataset ... ...",
                hint: None,
                max_width: 50,
            },
        ),
        SubmitStatus::Succeeded { dataset_id } => {
            let message = format!("Dataset created successfully (id {dataset_id})");
            let hint = vec![
                key_span("Enter"),
                Span::raw(": open chart  "),
                key_span("y"),
                Span::raw(": copy URL  "),
                key_span("Esc"),
                Span::raw(": dismiss"),
            ];
            render_dialog(
                frame,
                DialogConfig {
                    title: "Success",
                    color: Color::Green,
                    message: &message,
                    hint: Some(hint),
                    max_width: 60,
                },
            );
        }
        SubmitStatus::Failed { message } => {
            let hint = vec![
                Span::raw("Press "),
                key_span("Enter"),
                Span::raw(" or "),
                key_span("Esc"),
                Span::raw(" to dismiss"),
            ];
            render_dialog(
                frame,
                DialogConfig {
                    title: "Error",
                    color: Color::Red,
                    message: message.as_str(),
                    hint: Some(hint),
                    max_width: 60,
                },
            );
        }
    }
}
