//! Trait abstraction for the server client to enable mocking in tests

use crate::api::types::{CreateDatasetRequest, CreatedDataset};
use crate::state::Template;
use anyhow::Result;
use async_trait::async_trait;

/// Trait for server operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServerClientTrait: Send + Sync {
    /// Check if the server is reachable
    async fn check_connection(&self) -> bool;

    /// Fetch the template catalog
    async fn fetch_templates(&self) -> Result<Vec<Template>>;

    /// Create a dataset from the assembled form payload
    async fn create_dataset(&self, request: CreateDatasetRequest) -> Result<CreatedDataset>;
}
