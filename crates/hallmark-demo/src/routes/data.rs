//! Data identifier endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use serde::Deserialize;

use hallmark_common::{IssuedData, TokenMode, VerifyDataRequest, VerifyResponse};
use super::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct IssueQuery {
    /// Value to authenticate
    value: String,
    #[serde(default)]
    timed: bool,
}

/// Issue an identifier for the UTF-8 bytes of `value`
pub async fn issue(
    State(state): State<AppState>,
    Query(params): Query<IssueQuery>,
) -> Result<Json<IssuedData>, ApiError> {
    let mode = TokenMode::from_timed(params.timed);
    let data = params.value.as_bytes();

    let id = match mode {
        TokenMode::Undated => state.engine.sign(data),
        TokenMode::Timed => state.engine.sign_timed(Utc::now(), data)?,
    };

    tracing::debug!(mode = ?mode, len = data.len(), "Issued data identifier");

    Ok(Json(IssuedData {
        id: STANDARD.encode(id),
        mode,
        expires_in_secs: mode.is_timed().then_some(state.config.valid_duration_secs),
    }))
}

/// Verify an identifier against data. Always answers 200.
pub async fn verify(
    State(state): State<AppState>,
    Json(payload): Json<VerifyDataRequest>,
) -> Json<VerifyResponse> {
    let Ok(id) = STANDARD.decode(&payload.id) else {
        return Json(VerifyResponse { valid: false });
    };

    let data = payload.data.as_bytes();
    let valid = match payload.mode {
        TokenMode::Undated => state.engine.verify(&id, data),
        TokenMode::Timed => state.engine.verify_timed(&id, data, Utc::now(), state.valid_for()),
    };

    Json(VerifyResponse { valid })
}
