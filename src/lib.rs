// src/lib.rs
pub mod auth;
pub mod database;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod search;
pub mod state;
pub mod storage;
pub mod validation;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Builds the full application: API under /api, uploaded images under
/// /uploads, a liveness probe at /health. The binary and the end-to-end
/// tests both go through here.
pub fn build_app(state: AppState) -> Router {
    let api = routes::create_router();

    Router::new()
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(state.upload_dir.clone()))
        .route("/health", get(health_check))
        // Multipart product forms carry image files; the axum default body
        // limit (2MB) is below the 5MB per-image cap.
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
