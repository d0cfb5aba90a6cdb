//! HTTP client for communicating with the Strata server
//!
//! Thin JSON wrapper over reqwest. Retry and backoff are the transport
//! layer's concern upstream; each call here is a single attempt with a
//! request timeout.

use crate::api::traits::ServerClientTrait;
use crate::api::types::{CreateDatasetRequest, CreatedDataset};
use crate::config::TuiConfig;
use crate::state::Template;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Default server address
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8088";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failures of a single API call
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server returned {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Resolve the server base URL: environment variable first, then the
/// config file, then the default
pub fn resolve_server_url(config: &TuiConfig) -> String {
    std::env::var("STRATA_SERVER_URL")
        .ok()
        .or_else(|| config.server_url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
}

/// Client for communicating with the Strata server
pub struct ServerClient {
    http: reqwest::Client,
    base_url: String,
}

impl ServerClient {
    /// Create a new server client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ServerClientTrait for ServerClient {
    async fn check_connection(&self) -> bool {
        match self.http.get(self.url("/health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn fetch_templates(&self) -> Result<Vec<Template>> {
        let url = self.url("/api/template");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url, status }.into());
        }

        let templates = response
            .json::<Vec<Template>>()
            .await
            .map_err(|source| ApiError::Decode { url, source })?;
        Ok(templates)
    }

    async fn create_dataset(&self, request: CreateDatasetRequest) -> Result<CreatedDataset> {
        let url = self.url("/api/dataset");
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url, status }.into());
        }

        let created = response
            .json::<CreatedDataset>()
            .await
            .map_err(|source| ApiError::Decode { url, source })?;
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = ServerClient::new("http://localhost:8088/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8088");
        assert_eq!(client.url("/api/template"), "http://localhost:8088/api/template");
    }

    #[test]
    fn test_resolve_server_url_prefers_config_over_default() {
        // The env override is exercised manually; here config beats default.
        let config = TuiConfig {
            server_url: Some("http://strata.internal:8088".to_string()),
            ..Default::default()
        };
        if std::env::var("STRATA_SERVER_URL").is_err() {
            assert_eq!(resolve_server_url(&config), "http://strata.internal:8088");
        }
    }

    #[test]
    fn test_resolve_server_url_falls_back_to_default() {
        let config = TuiConfig::default();
        if std::env::var("STRATA_SERVER_URL").is_err() {
            assert_eq!(resolve_server_url(&config), DEFAULT_SERVER_URL);
        }
    }
}
