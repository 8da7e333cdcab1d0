//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::RelayStateDto, ui::state::AppState};

/// Debug endpoint to get current relay state (for testing purposes)
pub async fn debug_relay_state(State(state): State<Arc<AppState>>) -> Json<RelayStateDto> {
    let relay_state = state.get_relay_state_usecase.execute().await;

    // UseCase の結果から DTO への変換
    Json(relay_state.into())
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
