use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Upstream LLM failures never show up here: they are folded into
/// `ResumeResult::error` by the resume service.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Prompt resource '{name}' could not be loaded: {reason}")]
    ResourceNotFound { name: String, reason: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ResourceNotFound { name, reason } => {
                tracing::error!("Prompt resource '{name}' unavailable: {reason}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RESOURCE_NOT_FOUND",
                    "A required prompt template is unavailable".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
