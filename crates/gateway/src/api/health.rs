//! Liveness endpoint.

use axum::extract::State;
use axum::response::{IntoResponse, Json};

use crate::state::AppState;

/// Health probe: reports the configured app name and crate version.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "signal": "service_healthy",
        "app_name": state.config.app.name,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
