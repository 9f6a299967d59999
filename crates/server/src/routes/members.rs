//! Family member HTTP handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use health_core::FamilyMember;

use super::Pagination;
use crate::AppState;
use crate::error::AppError;

/// GET /members - List members with their reports embedded
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Pagination>,
) -> Result<Json<Vec<FamilyMember>>, AppError> {
    let members = state.db.list_members(params.skip(), params.limit()).await?;
    Ok(Json(members))
}

/// DELETE /members/{id} - Delete a member and all of its reports
///
/// Two-phase: enumerate the owned reports' files and remove each
/// best-effort, then delete the report rows and the member row in one
/// transaction. A file missing on disk never aborts the operation.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let paths = state
        .db
        .member_report_paths(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Member {} not found", id)))?;

    for path in &paths {
        state.uploads.remove(path).await;
    }

    if state.db.delete_member(id).await? {
        tracing::info!(member_id = id, reports = paths.len(), "Member deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Member {} not found", id)))
    }
}
