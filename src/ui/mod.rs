//! UI module for rendering the TUI

mod components;
mod form;
mod layout;
mod side_panel;

use crate::state::AppState;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState, status_message: Option<&str>) {
    let (form_area, side_area, status_area) = layout::create_layout(frame.area());

    form::draw(frame, form_area, state);
    side_panel::draw(frame, side_area, state);
    layout::draw_status_bar(frame, status_area, status_message);

    // Dialogs overlay everything; the submit dialog outranks queued errors
    if state.submit_status.is_active() {
        components::dialog::render_submit_dialog(frame, &state.submit_status);
    } else if let Some(message) = state.current_error() {
        components::dialog::render_error_dialog(frame, message);
    }
}
