//! Router configuration for the web server.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::price_page))
        .route("/api/prices", get(handlers::api_prices))
        .route("/api/debug", get(handlers::api_debug))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
