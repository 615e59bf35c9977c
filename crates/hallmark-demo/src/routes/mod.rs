//! HTTP route handlers for the demo service.

use axum::{
    Json, Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use hallmark::HallmarkError;
use hallmark_common::ErrorResponse;
use std::fmt::Write;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod captcha;
mod data;
mod health;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Demo page
        .route("/", get(index))

        // Health & Status
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/stats", get(health::stats))

        // Captcha endpoints
        .route("/captcha", get(captcha::issue))
        .route("/captcha/verify", post(captcha::verify))

        // Data endpoints
        .route("/data", get(data::issue))
        .route("/data/verify", post(data::verify))

        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Seconds a client should wait before retrying a transient failure
const RETRY_AFTER_SECS: &str = "1";

/// Issuance failure mapped onto an HTTP response
pub struct ApiError(HallmarkError);

impl From<HallmarkError> for ApiError {
    fn from(err: HallmarkError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        tracing::warn!(error = %self.0, status = status.as_u16(), "Issuance failed");
        let body = Json(ErrorResponse { error: self.0.to_string() });
        if self.0.is_retryable() {
            (status, [(header::RETRY_AFTER, RETRY_AFTER_SECS)], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

/// Plain-text page showing one identifier of every kind
async fn index() -> Result<String, ApiError> {
    let mut page = String::new();

    let (id, c) = hallmark::captcha::get_strings()?;
    let _ = write!(page, "Normal:\n   id: {}\n   captcha: {}", id, c);

    let (id, c) = hallmark::captcha::get_strings_timed(Utc::now())?;
    let _ = write!(page, "\nTimed:\n   id: {}\n   captcha: {}", id, c);

    let id = hallmark::data::get_strings("data")?;
    let _ = write!(page, "\ndata:\n   id: {}\n   data: data", id);

    let id = hallmark::data::get_strings_timed(Utc::now(), "data")?;
    let _ = write!(page, "\nTimed data:\n   id: {}\n   data: data", id);

    Ok(page)
}
