//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{echo, echo_example, health, metrics, moved, AppState};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        // Demo endpoints
        .route("/api/v1/echo", get(echo_example).post(echo))
        .route("/api/v1/moved", get(moved))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
