pub mod health;
pub mod sessions;
pub mod templates;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

/// Build the full API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/health", get(health::health))
        // Session lifecycle
        .route("/v1/sessions", post(sessions::create_session))
        .route("/v1/sessions/:user_id", get(sessions::list_sessions))
        .route("/v1/sessions/:user_id", delete(sessions::delete_all_sessions))
        .route(
            "/v1/sessions/:user_id/:session_id",
            get(sessions::get_session),
        )
        .route(
            "/v1/sessions/:user_id/:session_id",
            delete(sessions::delete_session),
        )
        // Instruction templates
        .route("/v1/templates/:group/:key", get(templates::get_template))
}
