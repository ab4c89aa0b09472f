//! Administrator routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use registrar_api_types::{AdminSummary, DeleteStudentResponse, SeedCatalogResponse};

use super::error::ApiError;
use super::params;
use super::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/students/{student_id}", delete(delete_student))
        .route("/api/admin/summary", get(summary))
        .route("/api/catalog/seed", post(seed_catalog))
}

/// Deletes a student with everything registered under them.
async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> Result<Json<DeleteStudentResponse>, ApiError> {
    let student_id = params::student_id(&student_id)?;
    state.accounts.delete_student(&student_id).await?;

    Ok(Json(DeleteStudentResponse {
        student_id: student_id.to_string(),
        deleted: true,
    }))
}

async fn summary(State(state): State<Arc<AppState>>) -> Result<Json<AdminSummary>, ApiError> {
    let summary = state.reports.admin_summary().await?;

    Ok(Json(AdminSummary {
        users: summary.population.users,
        students: summary.population.students,
        teachers: summary.population.teachers,
        deans: summary.population.deans,
        courses: summary.courses,
    }))
}

async fn seed_catalog(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SeedCatalogResponse>, ApiError> {
    let courses = state.catalog.seed().await?;
    Ok(Json(SeedCatalogResponse { courses }))
}
