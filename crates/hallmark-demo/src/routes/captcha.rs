//! Captcha issuance and verification endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use serde::Deserialize;

use hallmark_common::{IssuedCaptcha, TokenMode, VerifyCaptchaRequest, VerifyResponse};
use super::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct IssueQuery {
    /// Issue a timed captcha instead of an undated one
    #[serde(default)]
    timed: bool,
}

/// Issue a new captcha with the configured payload size
pub async fn issue(
    State(state): State<AppState>,
    Query(params): Query<IssueQuery>,
) -> Result<Json<IssuedCaptcha>, ApiError> {
    let size = state.config.payload_size;
    let mode = TokenMode::from_timed(params.timed);

    let (id, captcha) = match mode {
        TokenMode::Undated => state.engine.issue_captcha(size)?,
        TokenMode::Timed => state.engine.issue_timed_captcha(Utc::now(), size)?,
    };

    tracing::debug!(mode = ?mode, size, "Issued captcha");

    Ok(Json(IssuedCaptcha {
        id: STANDARD.encode(id),
        captcha: STANDARD.encode(captcha),
        mode,
        expires_in_secs: mode.is_timed().then_some(state.config.valid_duration_secs),
    }))
}

/// Verify a captcha answer. Always answers 200; failures carry no reason.
pub async fn verify(
    State(state): State<AppState>,
    Json(payload): Json<VerifyCaptchaRequest>,
) -> Json<VerifyResponse> {
    let (Ok(id), Ok(captcha)) = (STANDARD.decode(&payload.id), STANDARD.decode(&payload.captcha))
    else {
        return Json(VerifyResponse { valid: false });
    };

    let size = state.config.payload_size;
    let valid = match payload.mode {
        TokenMode::Undated => state.engine.verify_captcha(&id, &captcha, size),
        TokenMode::Timed => {
            state
                .engine
                .verify_timed_captcha(&id, &captcha, Utc::now(), state.valid_for(), size)
        }
    };

    Json(VerifyResponse { valid })
}
