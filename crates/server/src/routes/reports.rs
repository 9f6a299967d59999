//! Medical report HTTP handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use health_core::MedicalReport;

use super::Pagination;
use crate::AppState;
use crate::error::AppError;

/// GET /reports - List reports, most recent first
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Pagination>,
) -> Result<Json<Vec<MedicalReport>>, AppError> {
    let reports = state.db.list_reports(params.skip(), params.limit()).await?;
    Ok(Json(reports))
}

/// DELETE /reports/{id} - Delete a single report
///
/// The stored file is removed best-effort before the row; a failed file
/// deletion is logged and never blocks the delete.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let report = state
        .db
        .get_report(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

    state.uploads.remove(&report.file_path).await;
    state.db.delete_report(id).await?;

    tracing::info!(report_id = id, "Report deleted");
    Ok(StatusCode::NO_CONTENT)
}
