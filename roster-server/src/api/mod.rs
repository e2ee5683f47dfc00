//! API routes
//!
//! - [`health`] - liveness and readiness checks
//! - [`employees`] - employee records under `/api/v1/employees`

pub mod employees;
pub mod health;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::cors::CorsLayer;

use crate::core::ServerState;
use crate::middleware;

/// All routes, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(employees::router())
        .merge(health::router())
}

/// Fully configured application
///
/// Used both by the HTTP server and by `oneshot` calls in tests.
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Request logging
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .with_state(state)
}
