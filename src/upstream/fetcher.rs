//! Fetcher seam between the aggregator and the upstream service

use super::source::UpstreamSource;
use crate::error::UpstreamError;
use async_trait::async_trait;
use serde_json::Value;

/// Raw `numbers` array on success, typed failure reason otherwise
pub type FetchResult = Result<Vec<Value>, UpstreamError>;

/// Backend trait for retrieving candidate numbers from one source
#[async_trait]
pub trait NumberFetcher: Send + Sync {
    /// Perform exactly one upstream attempt for `source`.
    async fn fetch(&self, source: &UpstreamSource) -> FetchResult;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}

/// Extract the `numbers` array from a decoded payload.
///
/// Entries are returned untouched; filtering happens at merge time.
pub fn numbers_from_payload(payload: Value) -> FetchResult {
    match payload {
        Value::Object(mut fields) => match fields.remove("numbers") {
            Some(Value::Array(numbers)) => Ok(numbers),
            Some(other) => Err(UpstreamError::MalformedPayload(format!(
                "\"numbers\" is not an array: {}",
                other
            ))),
            None => Err(UpstreamError::MalformedPayload(
                "missing \"numbers\" field".to_string(),
            )),
        },
        other => Err(UpstreamError::MalformedPayload(format!(
            "expected an object, got {}",
            other
        ))),
    }
}
