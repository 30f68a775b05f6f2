//! Axum route handlers for the résumé submission boundary.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::state::AppState;
use crate::upload::controller::{EditError, SubmitError, UploadState};

/// POST /api/v1/resume/upload
///
/// Accepts `multipart/form-data` with a `resume` file part and runs one
/// ingestion lifecycle. Responds with the parsed record.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeRecord>, AppError> {
    let mut upload: Option<(Bytes, String, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("resume") {
            continue;
        }
        let filename = field.file_name().unwrap_or("resume").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let document = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("could not read resume part: {e}")))?;
        upload = Some((document, filename, mime_type));
    }

    let (document, filename, mime_type) =
        upload.ok_or_else(|| AppError::Validation("no resume file uploaded".to_string()))?;

    let record = state
        .controller
        .submit(document, &filename, &mime_type)
        .await
        .map_err(|e| match e {
            SubmitError::EmptySubmission => AppError::Validation(e.to_string()),
            SubmitError::AlreadyUploading => AppError::Conflict(e.to_string()),
            SubmitError::Ingestion(message) => AppError::Ingestion(message),
        })?;

    Ok(Json(record))
}

/// GET /api/v1/resume
///
/// Returns the current lifecycle state: the status tag plus the record when
/// one is held.
pub async fn handle_get_state(State(state): State<AppState>) -> Json<UploadState> {
    Json(state.controller.current())
}

#[derive(Debug, Deserialize)]
pub struct FieldEdit {
    pub path: String,
    pub value: String,
}

/// PATCH /api/v1/resume/fields
///
/// Applies one field edit addressed by a dotted/indexed path. A rejected
/// edit returns 422 and the held record is unchanged.
pub async fn handle_edit_field(
    State(state): State<AppState>,
    Json(edit): Json<FieldEdit>,
) -> Result<Json<ResumeRecord>, AppError> {
    let record = state
        .controller
        .apply_edit(&edit.path, &edit.value)
        .map_err(|e| match e {
            EditError::NoRecord => AppError::NotFound("no parsed résumé to edit".to_string()),
            EditError::InvalidPath(path_error) => AppError::InvalidPath(path_error),
        })?;

    Ok(Json(record))
}
