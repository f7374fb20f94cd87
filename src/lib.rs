//! Sliding-window number averaging service
//!
//! ```text
//! GET /numbers/:id → SourceRegistry → NumberFetcher (500ms, no retry)
//!     ↓
//! WindowStore.merge (dedup, oldest-first eviction) under one lock
//!     ↓
//! WindowSnapshot { windowPrevState, windowCurrState, numbers, avg }
//! ```

#[cfg(test)]
mod tests;

pub mod aggregator;
pub mod api;
pub mod config;
pub mod error;
pub mod upstream;
pub mod window;

pub use aggregator::{AverageService, WindowSnapshot};
pub use config::ServiceConfig;
pub use error::{ApiError, ConfigError, UpstreamError, ValidationError};
pub use upstream::{HttpNumberFetcher, NumberFetcher, SourceRegistry};
pub use window::{WindowStore, WindowValue};
