//! Request handlers

use super::AppState;
use crate::aggregator::WindowSnapshot;
use crate::error::ApiResult;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

/// Fetch from the selected source, merge, and report the window.
pub async fn get_numbers(
    State(service): State<AppState>,
    Path(number_id): Path<String>,
) -> ApiResult<Json<WindowSnapshot>> {
    match service.handle(&number_id).await {
        Ok(snapshot) => Ok(Json(snapshot)),
        Err(e) => {
            log::info!("Rejected number id {:?}", number_id);
            Err(e.into())
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub window_capacity: usize,
    pub window_len: usize,
    pub sources: Vec<String>,
}

pub async fn health_check(State(service): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        window_capacity: service.capacity(),
        window_len: service.window_len(),
        sources: service
            .source_labels()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}
