#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::upload::mutator::InvalidPath;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every failure in the pipeline resolves at the boundary where it arises
/// and reaches the client as a short human-readable message; no internal
/// error type crosses into a response unwrapped, and none is fatal to the
/// process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid field path: {0}")]
    InvalidPath(#[from] InvalidPath),

    #[error("Ingestion error: {0}")]
    Ingestion(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "UPLOAD_IN_PROGRESS", msg.clone()),
            AppError::InvalidPath(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_PATH",
                e.to_string(),
            ),
            AppError::Ingestion(msg) => {
                tracing::error!("Ingestion error: {msg}");
                (StatusCode::BAD_GATEWAY, "INGESTION_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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
