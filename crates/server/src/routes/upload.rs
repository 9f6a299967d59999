//! Upload ingestion HTTP handler

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::AppState;
use crate::error::AppError;
use crate::ingest;

/// POST /upload - Ingest one medical report file
///
/// Accepts a multipart body with a single `file` field, runs the full
/// ingestion pipeline, and returns the created report.
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.bin").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

        tracing::info!(filename = %filename, size = bytes.len(), "Received upload");

        let report = ingest::ingest_upload(&state, &filename, &bytes).await?;
        return Ok((StatusCode::CREATED, Json(report)));
    }

    Err(AppError::BadRequest("Missing file field".to_string()))
}
