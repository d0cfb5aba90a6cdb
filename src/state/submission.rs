//! Dataset submission status, validation, and history

use chrono::{DateTime, Utc};

use super::forms::{Rule, Validator};

/// Lifecycle of one dataset-creation attempt
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    /// Request is on the wire; the dialog is non-dismissible and further
    /// submits are rejected
    InFlight,
    Succeeded {
        dataset_id: i64,
    },
    Failed {
        message: String,
    },
}

impl SubmitStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmitStatus::InFlight)
    }

    /// Whether a submit dialog should be shown for this status
    pub fn is_active(&self) -> bool {
        !matches!(self, SubmitStatus::Idle)
    }
}

/// One successfully created dataset, kept for the session's history panel
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub dataset_name: String,
    pub dataset_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Check the required fields before any network call
///
/// Rules run in the order the form presents them: dataset name, schema,
/// database, template. Returns the first failure message.
pub fn validate_submission(
    dataset_name: &str,
    schema: Option<&str>,
    database_id: Option<i64>,
    template_name: Option<&str>,
) -> Option<String> {
    let mut validator = Validator::new();
    validator.add(dataset_name, Rule::NonEmpty, "Dataset name is required");
    validator.add(
        schema.unwrap_or_default(),
        Rule::NonEmpty,
        "Please select a schema",
    );
    validator.add(
        database_id.map(|id| id.to_string()).unwrap_or_default(),
        Rule::NonEmpty,
        "Please select a database",
    );
    validator.add(
        template_name.unwrap_or_default(),
        Rule::NonEmpty,
        "Please select a template",
    );
    validator.run().map(str::to_string)
}

/// Explore-view URL for a created dataset
pub fn explore_url(server_url: &str, dataset_id: i64) -> String {
    format!(
        "{}/explore/?datasource_id={id}&dataset_type=table&dataset_id={id}&datasource_type=table",
        server_url.trim_end_matches('/'),
        id = dataset_id,
    )
}
