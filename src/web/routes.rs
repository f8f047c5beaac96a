//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pages
        .route("/", get(handlers::index))
        .route("/search", get(handlers::search))
        // API routes
        .route("/autocomplete", get(handlers::autocomplete))
        .route("/stats", get(handlers::stats))
        .route("/health", get(handlers::health))
        // Static routes
        .route("/robots.txt", get(handlers::robots_txt))
        // Add middleware
        .layer(cors)
        .layer(CompressionLayer::new())
        // Add state
        .with_state(state)
}
