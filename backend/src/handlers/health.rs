//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub source: String,
    pub source_status: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Check the snapshot source can be read
    let source_status = if state.source.is_reachable().await {
        "reachable".to_string()
    } else {
        "unreachable".to_string()
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: state.source.kind().to_string(),
        source_status,
    })
}
