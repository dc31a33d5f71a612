//! Session lifecycle API endpoints.
//!
//! Absent sessions and empty listings map to 4xx responses; only genuine
//! store failures become 500s.  The manager already folds "already exists"
//! into a successful create, so there is no conflict status here.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::Deserialize;

use vm_domain::session::Session;

use crate::state::AppState;

/// Map an infrastructure failure to a 500 with a stable signal.
fn store_failure(e: vm_domain::error::Error) -> (StatusCode, Json<serde_json::Value>) {
    tracing::error!(error = %e, "session store failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "signal": "store_failure" })),
    )
}

fn session_json(session: &Session) -> serde_json::Value {
    serde_json::json!({
        "app_name": session.app_name,
        "user_id": session.user_id,
        "session_id": session.id,
        "events": session.events.len(),
        "created_at": session.created_at.to_rfc3339(),
        "updated_at": session.updated_at.to_rfc3339(),
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /v1/sessions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct CreateSessionBody {
    pub user_id: String,
    /// Caller-supplied id; omitted means "mint one for me".
    #[serde(default)]
    pub session_id: Option<String>,
    /// Application override; omitted means the configured default.
    #[serde(default)]
    pub app_name: Option<String>,
}

/// Create a session, or attach to the existing one with the same id.
pub async fn create_session(
    State(state): State<AppState>,
    Json(body): Json<CreateSessionBody>,
) -> impl IntoResponse {
    match state
        .sessions
        .create_session(
            body.app_name.as_deref(),
            &body.user_id,
            body.session_id.as_deref(),
        )
        .await
    {
        Ok(session) => Json(serde_json::json!({
            "signal": "session_ready",
            "session": session_json(&session),
        }))
        .into_response(),
        Err(e) => store_failure(e).into_response(),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /v1/sessions/:user_id
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// List all sessions for one user.  An empty list is a normal response.
pub async fn list_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.sessions.list_sessions(None, &user_id).await {
        Ok(sessions) => Json(serde_json::json!({
            "sessions": sessions.iter().map(session_json).collect::<Vec<_>>(),
            "count": sessions.len(),
        }))
        .into_response(),
        Err(e) => store_failure(e).into_response(),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /v1/sessions/:user_id/:session_id
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn get_session(
    State(state): State<AppState>,
    Path((user_id, session_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match state.sessions.get_session(None, &user_id, &session_id).await {
        Ok(Some(session)) => Json(session_json(&session)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "signal": "session_not_found" })),
        )
            .into_response(),
        Err(e) => store_failure(e).into_response(),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DELETE /v1/sessions/:user_id/:session_id
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn delete_session(
    State(state): State<AppState>,
    Path((user_id, session_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match state
        .sessions
        .delete_session(None, &user_id, &session_id)
        .await
    {
        Ok(true) => Json(serde_json::json!({
            "signal": "session_deleted",
            "session_id": session_id,
        }))
        .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "signal": "session_not_found" })),
        )
            .into_response(),
        Err(e) => store_failure(e).into_response(),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DELETE /v1/sessions/:user_id
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Delete every session the user has.  "Nothing to delete" is a 404, kept
/// distinct from a successful bulk delete.
pub async fn delete_all_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.sessions.delete_all_sessions(None, &user_id).await {
        Ok((true, count)) => Json(serde_json::json!({
            "signal": "sessions_deleted",
            "deleted": count,
        }))
        .into_response(),
        Ok((false, _)) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "signal": "no_sessions_found" })),
        )
            .into_response(),
        Err(e) => store_failure(e).into_response(),
    }
}
