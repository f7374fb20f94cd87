//! Upstream number sources
//!
//! Provides the pieces needed to talk to the number generator service:
//! - Source kinds and their configurable identifier labels
//! - Registry mapping identifiers to endpoint URLs
//! - `NumberFetcher` trait with a reqwest-backed implementation
//!
//! ## Payload
//!
//! Every endpoint answers `GET` with `{ "numbers": [ ... ] }`. Anything else
//! is reported as [`UpstreamError::MalformedPayload`](crate::error::UpstreamError).

pub mod fetcher;
pub mod http;
pub mod source;

pub use fetcher::{FetchResult, NumberFetcher};
pub use http::HttpNumberFetcher;
pub use source::{SourceKind, SourceRegistry, UpstreamSource};
