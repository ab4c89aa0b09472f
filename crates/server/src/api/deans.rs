use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use registrar_api_types::DeanSummary;

use super::error::ApiError;
use super::params;
use super::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/deans/{dean_id}/summary", get(summary))
}

/// Headcounts and average marks for the dean's department.
async fn summary(
    State(state): State<Arc<AppState>>,
    Path(dean_id): Path<String>,
) -> Result<Json<DeanSummary>, ApiError> {
    let dean_id = params::dean_id(&dean_id)?;
    let summary = state.reports.dean_summary(&dean_id).await?;

    Ok(Json(DeanSummary {
        dean_id: summary.dean.dean_id.to_string(),
        department: summary.dean.department,
        students: summary.students,
        teachers: summary.teachers,
        average_marks: summary.average_marks,
    }))
}
