//! Application state and core logic

use crate::api::{CreateDatasetRequest, CreatedDataset, ServerClient, ServerClientTrait};
use crate::config::TuiConfig;
use crate::state::{explore_url, validate_submission, AppState, FormRow, SubmitStatus};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Main application struct
pub struct App<C: ServerClientTrait> {
    /// Current application state
    pub state: AppState,
    /// Server client for HTTP communication
    client: Arc<C>,
    /// Whether the app should quit
    quit: bool,
    /// Transient status bar message
    pub status_message: Option<String>,
    /// In-flight dataset creation, polled from the event loop
    pending_submit: Option<JoinHandle<Result<CreatedDataset>>>,
}

impl App<ServerClient> {
    /// Create a new App instance connected to the configured server
    pub async fn new(config: &TuiConfig) -> Result<Self> {
        let server_url = crate::api::resolve_server_url(config);
        let client = ServerClient::new(server_url.clone())?;
        let mut app = Self::with_client(client, server_url, config);

        app.state.server_connected = app.client.check_connection().await;
        if app.state.server_connected {
            app.refresh_templates().await;
        }

        Ok(app)
    }
}

impl<C: ServerClientTrait + 'static> App<C> {
    /// Create an App around an existing client (used directly by tests)
    pub fn with_client(client: C, server_url: String, config: &TuiConfig) -> Self {
        let mut state = AppState::default();
        state.server_url = server_url;
        state.database_id = config.database_id;
        state.database_label = config.database_label.clone();
        state.schema = config.schema.clone();

        Self {
            state,
            client: Arc::new(client),
            quit: false,
            status_message: None,
            pending_submit: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Submit dialog is modal
        if self.state.submit_status.is_active() {
            self.handle_submit_dialog_key(key);
            return Ok(());
        }

        // Error dialog is modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status message on key press
        self.status_message = None;

        // Global shortcuts
        if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.refresh_templates().await;
            return Ok(());
        }
        if key.code == KeyCode::Char('s')
            && (key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(crate::platform::SUBMIT_MODIFIER))
        {
            self.submit_dataset().await;
            return Ok(());
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.next_row(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_row(),
            KeyCode::Left if matches!(self.state.focused(), FormRow::TemplateSelect) => {
                self.state.select_prev_template();
            }
            KeyCode::Right if matches!(self.state.focused(), FormRow::TemplateSelect) => {
                self.state.select_next_template();
            }
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.add_entry_at_focus();
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.remove_entry_at_focus();
            }
            KeyCode::Enter if matches!(self.state.focused(), FormRow::Run) => {
                self.submit_dataset().await;
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.input_char(c);
            }
            KeyCode::Backspace => self.state.backspace(),
            _ => {}
        }
        Ok(())
    }

    /// Handle keys while the submit dialog is shown
    fn handle_submit_dialog_key(&mut self, key: KeyEvent) {
        match self.state.submit_status.clone() {
            // Non-dismissible while the request is on the wire
            SubmitStatus::InFlight => {}
            SubmitStatus::Succeeded { dataset_id } => match key.code {
                KeyCode::Enter => {
                    self.open_explore(dataset_id);
                    self.state.submit_status = SubmitStatus::Idle;
                }
                KeyCode::Char('y') => self.copy_explore_url(dataset_id),
                KeyCode::Esc => self.state.submit_status = SubmitStatus::Idle,
                _ => {}
            },
            SubmitStatus::Failed { .. } => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.state.submit_status = SubmitStatus::Idle;
                }
            }
            SubmitStatus::Idle => {}
        }
    }

    /// Fetch the template catalog and install it
    ///
    /// Safe to call at any time; the last successful response wins and a
    /// failure leaves the current catalog untouched.
    pub async fn refresh_templates(&mut self) {
        match self.client.fetch_templates().await {
            Ok(templates) => {
                let count = templates.len();
                self.state.apply_catalog(templates);
                self.state.server_connected = true;
                self.status_message = Some(format!(
                    "Loaded {count} template{}",
                    if count == 1 { "" } else { "s" }
                ));
            }
            Err(e) => {
                tracing::warn!(error = %e, "template catalog fetch failed");
                self.push_error(format!("Failed to load templates: {e}"));
            }
        }
    }

    /// Validate the form and start the dataset-creation call
    ///
    /// A second submit while one is pending is rejected. Validation runs
    /// before any network traffic; the first failing rule is reported and
    /// nothing is sent.
    pub async fn submit_dataset(&mut self) {
        if self.state.submit_status.is_in_flight() {
            return;
        }

        if let Some(message) = validate_submission(
            &self.state.dataset_name,
            self.state.schema.as_deref(),
            self.state.database_id,
            self.state.selected_template_name(),
        ) {
            self.push_error(message);
            return;
        }

        // Validation guarantees these are present
        let (Some(database), Some(schema), Some(template)) = (
            self.state.database_id,
            self.state.schema.clone(),
            self.state.form.template(),
        ) else {
            return;
        };

        let request = CreateDatasetRequest {
            database,
            schema,
            params: self.state.form.payload_snapshot(),
            template_id: template.id,
            dataset_name: self.state.dataset_name.clone(),
        };

        self.state.submit_status = SubmitStatus::InFlight;
        let client = Arc::clone(&self.client);
        self.pending_submit =
            Some(tokio::spawn(
                async move { client.create_dataset(request).await },
            ));
    }

    /// Poll the in-flight submission, if any, and apply its outcome
    ///
    /// Called from the event loop on every tick so the dialog updates while
    /// the request is pending.
    pub async fn poll_submission(&mut self) {
        let finished = self
            .pending_submit
            .as_ref()
            .map(|handle| handle.is_finished())
            .unwrap_or(false);
        if !finished {
            return;
        }

        let Some(handle) = self.pending_submit.take() else {
            return;
        };
        let outcome = handle.await;
        self.apply_submit_outcome(outcome);
    }

    fn apply_submit_outcome(
        &mut self,
        outcome: std::result::Result<Result<CreatedDataset>, tokio::task::JoinError>,
    ) {
        match outcome {
            Ok(Ok(created)) => {
                self.state.record_submission(created.dataset_id);
                self.state.submit_status = SubmitStatus::Succeeded {
                    dataset_id: created.dataset_id,
                };
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "dataset creation failed");
                self.state.submit_status = SubmitStatus::Failed {
                    message: "Failed to create dataset.".to_string(),
                };
            }
            Err(e) => {
                tracing::error!(error = %e, "dataset creation task panicked");
                self.state.submit_status = SubmitStatus::Failed {
                    message: "Failed to create dataset.".to_string(),
                };
            }
        }
    }

    /// Open the created dataset in the server's explore view
    ///
    /// Fire-and-forget; a failure to spawn the browser is logged and shown
    /// in the status bar, nothing else depends on it.
    fn open_explore(&mut self, dataset_id: i64) {
        let url = explore_url(&self.state.server_url, dataset_id);
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, url, "failed to open browser");
            self.status_message = Some(format!("Could not open browser: {url}"));
        }
    }

    /// Copy the explore URL of a created dataset to the clipboard
    fn copy_explore_url(&mut self, dataset_id: i64) {
        let url = explore_url(&self.state.server_url, dataset_id);
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(url.clone())) {
            Ok(()) => self.status_message = Some("Explore URL copied".to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard unavailable");
                self.status_message = Some(url);
            }
        }
    }

    /// Await the pending submission to completion (test helper)
    #[cfg(test)]
    pub async fn wait_for_submission(&mut self) {
        if let Some(handle) = self.pending_submit.take() {
            let outcome = handle.await;
            self.apply_submit_outcome(outcome);
        }
    }
}
