//! HTTP number fetcher
//!
//! Calls the configured endpoint for a source with a bearer token and a
//! fixed timeout.
//!
//! ## API Reference
//!
//! Endpoint: `GET <source url>`
//! Header: `Authorization: Bearer <token>`
//! Returns: `{ "numbers": [2, 3, 5, 7] }`

use super::fetcher::{numbers_from_payload, FetchResult, NumberFetcher};
use super::source::UpstreamSource;
use crate::error::{ConfigError, UpstreamError};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// reqwest-backed fetcher shared by all requests
#[derive(Debug, Clone)]
pub struct HttpNumberFetcher {
    client: reqwest::Client,
    auth_token: Option<String>,
}

impl HttpNumberFetcher {
    /// Build a fetcher whose client aborts any call after `timeout`.
    ///
    /// # Arguments
    /// * `timeout` - Per-request timeout (connect + body)
    /// * `auth_token` - Bearer token, omitted from requests when `None`
    pub fn new(timeout: Duration, auth_token: Option<String>) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self { client, auth_token })
    }
}

#[async_trait]
impl NumberFetcher for HttpNumberFetcher {
    async fn fetch(&self, source: &UpstreamSource) -> FetchResult {
        let mut request = self.client.get(&source.url);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let payload: Value = response.json().await?;
        numbers_from_payload(payload)
    }

    fn backend_type(&self) -> &'static str {
        "http"
    }
}
