use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::ask;
use super::health;
use super::ingest;
use super::middleware::logging_middleware;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Question answering
        .route("/ask", post(ask::ask))
        // Corpus ingestion
        .route("/ingest", post(ingest::ingest))
        // Health endpoints
        .route("/healthz", get(health::health_check))
        .route("/readyz", get(health::ready_check))
        // Add state and middleware
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        // Browser clients call this API directly during development
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
