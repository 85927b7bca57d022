pub mod database;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Assembles the full application: resource routers under /api plus the
/// banner and liveness routes.
pub fn build_app(state: AppState) -> Router {
    let api = routes::create_router()
        .route("/", get(|| async { "StockWatch API" }))
        .route("/health", get(health_check));

    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
