//! Instruction template introspection.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};

use crate::state::AppState;

/// Resolve one instruction template for the configured locale.
///
/// Query parameters become substitution variables, so
/// `GET /v1/templates/chat/INSTRUCTIONS?user=alice` renders `{{ user }}`
/// placeholders.  An unknown group is a 404; an unresolved placeholder is
/// a 400 (caller supplied the wrong variables).
pub async fn get_template(
    State(state): State<AppState>,
    Path((group, key)): Path<(String, String)>,
    Query(vars): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    match state.templates.get(&group, &key, &vars) {
        Ok(Some(instructions)) => Json(serde_json::json!({
            "group": group,
            "key": key,
            "locale": state.templates.active_locale(),
            "instructions": instructions,
        }))
        .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "signal": "template_not_found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "signal": "template_render_failed",
                "error": e.to_string(),
            })),
        )
            .into_response(),
    }
}
