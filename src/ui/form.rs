//! Dataset form rendering

use crate::state::{AppState, FormRow};
use crate::ui::components::render_action_button;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of one form row including its border
const ROW_HEIGHT: u16 = 3;

/// Draw the dataset form
///
/// Rows are derived from the current template selection; the focused row is
/// always scrolled into view.
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Create Dataset ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < ROW_HEIGHT {
        return;
    }

    let rows = state.form_rows();
    let focus = state.focused_row.min(rows.len() - 1);
    let visible = ((inner.height / ROW_HEIGHT) as usize).max(1);
    let start = if focus >= visible { focus + 1 - visible } else { 0 };

    for (slot, (row_index, row)) in rows
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .enumerate()
    {
        let row_area = Rect {
            x: inner.x,
            y: inner.y + slot as u16 * ROW_HEIGHT,
            width: inner.width,
            height: ROW_HEIGHT,
        };
        let is_active = row_index == focus;

        match row {
            FormRow::TemplateSelect => draw_template_select(frame, row_area, state, is_active),
            FormRow::Scalar { param } => {
                let description = param_description(state, param);
                draw_input_row(
                    frame,
                    row_area,
                    param,
                    state.form.value(param).unwrap_or_default(),
                    description,
                    is_active,
                );
            }
            FormRow::MultiEntry { param, entry_index } => {
                draw_multi_entry(frame, row_area, state, param, *entry_index, is_active);
            }
            FormRow::DatasetName => draw_input_row(
                frame,
                row_area,
                "dataset name",
                &state.dataset_name,
                "Dataset name",
                is_active,
            ),
            FormRow::Run => {
                let enabled = !state.submit_status.is_in_flight();
                render_action_button(frame, row_area, "RUN", is_active, enabled, Color::Green);
            }
        }
    }
}

fn param_description<'a>(state: &'a AppState, param: &str) -> &'a str {
    state
        .form
        .template()
        .and_then(|t| t.param(param))
        .map(|p| p.description.as_str())
        .unwrap_or_default()
}

fn draw_template_select(frame: &mut Frame, area: Rect, state: &AppState, is_active: bool) {
    let selected_label = state
        .selected_template_index
        .and_then(|index| state.registry.get(index))
        .map(|t| t.label.as_str());

    let line = match selected_label {
        Some(label) if is_active => Line::from(vec![
            Span::styled("◂ ", Style::default().fg(Color::Cyan)),
            Span::styled(label, Style::default().fg(Color::Cyan)),
            Span::styled(" ▸", Style::default().fg(Color::Cyan)),
        ]),
        Some(label) => Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
        None if state.registry.is_empty() => Line::from(Span::styled(
            "No templates loaded",
            Style::default().fg(Color::DarkGray),
        )),
        None => Line::from(Span::styled(
            "Select template (◂ ▸)",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    };

    let border_color = if is_active { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .title(" template ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_multi_entry(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    param: &str,
    entry_index: u32,
    is_active: bool,
) {
    let Some(list) = state.form.collector(param) else {
        return;
    };
    let total = list.len();
    let position = list
        .entries()
        .iter()
        .position(|e| e.index == entry_index)
        .unwrap_or(0);
    let value = list
        .entries()
        .iter()
        .find(|e| e.index == entry_index)
        .map(|e| e.value.as_str())
        .unwrap_or_default();

    let label = format!("{param} {}/{}", position + 1, total);
    draw_input_row(
        frame,
        area,
        &label,
        value,
        param_description(state, param),
        is_active,
    );
}

/// Draw a single-line input row with a dim placeholder when empty
fn draw_input_row(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    is_active: bool,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if is_active { "▌" } else { "" };

    let line = if value.is_empty() {
        let ghost = if !placeholder.is_empty() {
            placeholder
        } else if is_active {
            ""
        } else {
            "(empty)"
        };
        Line::from(vec![
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
            Span::styled(
                ghost,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled(value, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ])
    };

    let border_color = if is_active { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(Paragraph::new(line).block(block), area);
}
