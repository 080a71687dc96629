//! HTTP-facing error types

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors returned by the webhook endpoints.
///
/// Dispatch failures never show up here; the dispatcher answers them in chat.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Invalid update payload: {0}")]
    InvalidUpdate(#[from] serde_json::Error),

    #[error("Webhook setup failed: {0:#}")]
    Setup(anyhow::Error),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);

        let body = match &self {
            WebhookError::InvalidUpdate(_) => serde_json::json!({
                "ok": false,
                "error": "Internal server error",
            }),
            WebhookError::Setup(err) => serde_json::json!({
                "success": false,
                "error": format!("{:#}", err),
            }),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
