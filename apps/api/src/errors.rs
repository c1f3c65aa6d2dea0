use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::embedding::EmbeddingError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every error surfaces to the client as a JSON body `{"error": "..."}`.
/// Validation and extraction messages are specific; upstream and internal
/// details are logged server-side and replaced with generic messages.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller mistake: missing file parts, unsupported format, or a
    /// document with no extractable text. Resubmitting correctly helps.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A document could not be parsed. Retrying the same file will not help.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The embedding service failed; the caller may retry later.
    #[error("Upstream error: {0}")]
    Upstream(#[from] EmbeddingError),

    /// Degenerate similarity input (zero-norm or mismatched vectors).
    /// Indicates an internal inconsistency, not a caller mistake.
    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Extraction(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Upstream(err) => {
                tracing::error!(stage = "embed", "Embedding service error: {err}");
                let status = if err.is_rate_limited() {
                    StatusCode::SERVICE_UNAVAILABLE
                } else {
                    StatusCode::BAD_GATEWAY
                };
                (status, "Embedding service unavailable".to_string())
            }
            AppError::Computation(msg) => {
                tracing::error!(stage = "score", "Similarity computation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred while scoring".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}
