//! Application state definitions

use crate::state::forms::ParamForm;
use crate::state::submission::{SubmissionRecord, SubmitStatus};
use crate::state::templates::{Template, TemplateRegistry};
use chrono::Utc;

/// One focusable row of the dataset form
///
/// The row list is derived from the current template selection, so it
/// changes shape when the selection changes or multi-value entries are
/// added and removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormRow {
    /// Template selector (Left/Right cycles the catalog)
    TemplateSelect,
    /// Input row for one scalar parameter
    Scalar { param: String },
    /// Input row for one entry of a multi-value parameter
    MultiEntry { param: String, entry_index: u32 },
    /// Dataset name input
    DatasetName,
    /// RUN button
    Run,
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Template catalog
    pub registry: TemplateRegistry,
    pub selected_template_index: Option<usize>,

    // Form
    pub form: ParamForm,
    pub dataset_name: String,
    pub focused_row: usize,

    // Submission context (from configuration; browsing lives in the web UI)
    pub server_url: String,
    pub database_id: Option<i64>,
    pub database_label: Option<String>,
    pub schema: Option<String>,

    // Submission
    pub submit_status: SubmitStatus,
    pub history: Vec<SubmissionRecord>,

    // UI state
    pub server_connected: bool,
    errors: Vec<String>,
}

impl AppState {
    /// Derive the focusable rows for the current selection
    pub fn form_rows(&self) -> Vec<FormRow> {
        let mut rows = vec![FormRow::TemplateSelect];

        if let Some(template) = self.form.template() {
            for param in &template.params {
                match self.form.collector(&param.name) {
                    Some(list) => {
                        for entry in list.entries() {
                            rows.push(FormRow::MultiEntry {
                                param: param.name.clone(),
                                entry_index: entry.index,
                            });
                        }
                    }
                    None => rows.push(FormRow::Scalar {
                        param: param.name.clone(),
                    }),
                }
            }
        }

        rows.push(FormRow::DatasetName);
        rows.push(FormRow::Run);
        rows
    }

    /// The currently focused row, clamped to the derived list
    pub fn focused(&self) -> FormRow {
        let rows = self.form_rows();
        let index = self.focused_row.min(rows.len() - 1);
        rows[index].clone()
    }

    /// Move focus to the next row (wraps around)
    pub fn next_row(&mut self) {
        let count = self.form_rows().len();
        self.focused_row = (self.focused_row.min(count - 1) + 1) % count;
    }

    /// Move focus to the previous row (wraps around)
    pub fn prev_row(&mut self) {
        let count = self.form_rows().len();
        let current = self.focused_row.min(count - 1);
        self.focused_row = if current == 0 { count - 1 } else { current - 1 };
    }

    fn clamp_focus(&mut self) {
        let count = self.form_rows().len();
        if self.focused_row >= count {
            self.focused_row = count - 1;
        }
    }

    /// Apply a template selection by selector index
    ///
    /// Re-selecting the current index is a no-op so user input survives a
    /// repeated selection event; an actual switch re-derives the whole
    /// parameter form synchronously. An out-of-range index is a bug in the
    /// caller (options are derived from the same list) and is logged.
    pub fn select_template(&mut self, index: usize) {
        if self.selected_template_index == Some(index) {
            return;
        }
        let Some(template) = self.registry.get(index) else {
            tracing::warn!(index, len = self.registry.len(), "template index out of range");
            return;
        };
        let template = template.clone();
        self.form.select_template(&template);
        self.selected_template_index = Some(index);
        self.clamp_focus();
    }

    /// Cycle the template selection forward
    pub fn select_next_template(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        let next = match self.selected_template_index {
            Some(index) => (index + 1) % self.registry.len(),
            None => 0,
        };
        self.select_template(next);
    }

    /// Cycle the template selection backward
    pub fn select_prev_template(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        let prev = match self.selected_template_index {
            Some(0) | None => self.registry.len() - 1,
            Some(index) => index - 1,
        };
        self.select_template(prev);
    }

    /// Install a freshly fetched catalog
    ///
    /// The latest successful response wins. The current selection survives
    /// only when the same index still holds an identical template; if the
    /// template changed shape under the same name the form is re-derived,
    /// and otherwise the selection is cleared.
    pub fn apply_catalog(&mut self, templates: Vec<Template>) {
        let previous = self
            .selected_template_index
            .and_then(|index| self.registry.get(index).cloned());

        self.registry.replace(templates);

        if let (Some(index), Some(previous)) = (self.selected_template_index, previous) {
            match self.registry.get(index) {
                Some(current) if *current == previous => {}
                Some(current) if current.name == previous.name => {
                    let current = current.clone();
                    self.form.select_template(&current);
                }
                _ => {
                    self.selected_template_index = None;
                    self.form.clear_selection();
                }
            }
        }
        self.clamp_focus();
    }

    /// Route a typed character to the focused row
    pub fn input_char(&mut self, c: char) {
        match self.focused() {
            FormRow::DatasetName => self.dataset_name.push(c),
            FormRow::Scalar { param } => {
                let mut value = self.form.value(&param).unwrap_or_default().to_string();
                value.push(c);
                self.form.set_scalar(&param, value);
            }
            FormRow::MultiEntry { param, entry_index } => {
                let mut value = self.entry_value(&param, entry_index);
                value.push(c);
                self.form.update_entry(&param, entry_index, value);
            }
            FormRow::TemplateSelect | FormRow::Run => {}
        }
    }

    /// Route a backspace to the focused row
    pub fn backspace(&mut self) {
        match self.focused() {
            FormRow::DatasetName => {
                self.dataset_name.pop();
            }
            FormRow::Scalar { param } => {
                let mut value = self.form.value(&param).unwrap_or_default().to_string();
                value.pop();
                self.form.set_scalar(&param, value);
            }
            FormRow::MultiEntry { param, entry_index } => {
                let mut value = self.entry_value(&param, entry_index);
                value.pop();
                self.form.update_entry(&param, entry_index, value);
            }
            FormRow::TemplateSelect | FormRow::Run => {}
        }
    }

    /// Add an entry to the multi-value parameter under focus
    pub fn add_entry_at_focus(&mut self) {
        if let FormRow::MultiEntry { param, .. } = self.focused() {
            self.form.add_entry(&param);
        }
    }

    /// Remove the focused multi-value entry
    ///
    /// Refused while the parameter has a single entry, so the field always
    /// keeps one editable row.
    pub fn remove_entry_at_focus(&mut self) {
        if let FormRow::MultiEntry { param, entry_index } = self.focused() {
            let count = self.form.collector(&param).map(|l| l.len()).unwrap_or(0);
            if count > 1 {
                self.form.remove_entry(&param, entry_index);
                self.clamp_focus();
            }
        }
    }

    fn entry_value(&self, param: &str, entry_index: u32) -> String {
        self.form
            .collector(param)
            .and_then(|list| list.entries().iter().find(|e| e.index == entry_index))
            .map(|e| e.value.clone())
            .unwrap_or_default()
    }

    /// Name of the selected template, if any
    pub fn selected_template_name(&self) -> Option<&str> {
        self.form.template().map(|t| t.name.as_str())
    }

    /// Record a successful creation in the session history
    pub fn record_submission(&mut self, dataset_id: i64) {
        self.history.push(SubmissionRecord {
            dataset_name: self.dataset_name.clone(),
            dataset_id,
            created_at: Utc::now(),
        });
    }

    // Error queue (modal, dismissed front-first)

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        if !self.errors.is_empty() {
            self.errors.remove(0);
        }
    }
}
