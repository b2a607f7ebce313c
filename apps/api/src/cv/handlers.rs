//! Axum route handlers for the per-user CV document.

use axum::{extract::State, Json};
use serde_json::Value;

use crate::auth::AuthUser;
use crate::cv::{parse_extracted, CvAction, CvData};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/cv
pub async fn handle_get_cv(State(state): State<AppState>, user: AuthUser) -> Json<CvData> {
    Json(state.workspace.snapshot(&user.uid).await)
}

/// POST /api/cv/actions
///
/// Applies one reducer action, e.g. `{"type": "addExperience", "entry": {...}}`,
/// and returns the new document.
pub async fn handle_dispatch(
    State(state): State<AppState>,
    user: AuthUser,
    Json(action): Json<CvAction>,
) -> Json<CvData> {
    Json(state.workspace.dispatch(&user.uid, action).await)
}

/// POST /api/cv/load
///
/// Validates an externally produced object (usually `parsed` from
/// `/api/analyze-cv`) and shallow-merges it into the document.
pub async fn handle_load_extracted(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<Value>,
) -> Result<Json<CvData>, AppError> {
    let data = parse_extracted(body).map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(Json(
        state
            .workspace
            .dispatch(&user.uid, CvAction::LoadExtracted { data })
            .await,
    ))
}

/// DELETE /api/cv
///
/// Dispatches `reset`; the response is the empty document.
pub async fn handle_reset(State(state): State<AppState>, user: AuthUser) -> Json<CvData> {
    Json(state.workspace.dispatch(&user.uid, CvAction::Reset).await)
}
