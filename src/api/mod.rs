//! HTTP API
//!
//! Routes:
//! - `GET /numbers/:numberid` - run one fetch/merge/average cycle
//! - `GET /health` - liveness plus window occupancy

pub mod handlers;

use crate::aggregator::AverageService;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Shared handler state
pub type AppState = Arc<AverageService>;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/numbers/:numberid", get(handlers::get_numbers))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
