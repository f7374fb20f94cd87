//! Error types for the average service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Caller-side errors, rejected before any state is touched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Source identifier not present in the registry
    #[error("Invalid number ID provided: {given:?}. Must be one of {expected}.")]
    InvalidSourceId { given: String, expected: String },
}

/// Failure reasons for a single upstream fetch.
///
/// These never leave the aggregator; each one degrades to an empty fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("request timed out")]
    Timeout,

    #[error("upstream responded with status {0}")]
    Status(u16),

    #[error("no response received: {0}")]
    Connection(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("error setting up request: {0}")]
    Request(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if let Some(status) = err.status() {
            UpstreamError::Status(status.as_u16())
        } else if err.is_decode() {
            UpstreamError::MalformedPayload(err.to_string())
        } else if err.is_connect() || err.is_request() || err.is_body() {
            UpstreamError::Connection(err.to_string())
        } else {
            UpstreamError::Request(err.to_string())
        }
    }
}

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("duplicate source label {0:?}")]
    DuplicateLabel(String),

    #[error("{0} source is configured more than once")]
    DuplicateSource(&'static str),

    #[error("no {0} source configured")]
    MissingSource(&'static str),

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

/// API-specific errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
