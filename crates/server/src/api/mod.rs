//! HTTP routes of the registrar.

pub mod accounts;
pub mod admin;
pub mod deans;
pub mod error;
pub mod params;
pub mod state;
pub mod students;
pub mod teachers;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use registrar_api_types::HealthCheckResponse;
use tower_http::cors::CorsLayer;

pub use error::ApiError;
pub use state::AppState;

/// Builds the full API router over the shared state.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .merge(accounts::router())
        .merge(admin::router())
        .merge(students::router())
        .merge(teachers::router())
        .merge(deans::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse::ok())
}
