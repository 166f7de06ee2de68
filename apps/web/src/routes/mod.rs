pub mod demo;
pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(demo::handle_landing))
        .route("/health", get(health::health_handler))
        // HTML form flow
        .route("/demo/upload", post(demo::handle_upload_form))
        .route("/demo/select", post(demo::handle_select_form))
        .route("/demo/ats", post(demo::handle_ats_form))
        // JSON mirror
        .route("/api/demo", get(demo::handle_get_snapshot))
        .route("/api/demo/upload", post(demo::handle_upload_json))
        .route("/api/demo/select", post(demo::handle_select_json))
        .route("/api/demo/ats", post(demo::handle_ats_json))
        .fallback(not_found)
        .with_state(state)
}
