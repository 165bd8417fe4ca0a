//! HTTP API for allowlist registration.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use crate::registry::{Registry, Store};
use crate::service::RegistrationService;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Registration and listing service
    pub service: RegistrationService,
}

impl AppState {
    /// Create new application state.
    pub fn new(registry: Registry, store: Store) -> Self {
        Self {
            service: RegistrationService::new(registry, store),
        }
    }
}

/// Create the API router, allowing cross-origin requests from anywhere.
pub fn create_router(state: AppState) -> Router {
    create_router_with_cors(state, CorsLayer::permissive())
}

/// Create the API router with a custom CORS policy.
pub fn create_router_with_cors(state: AppState, cors: CorsLayer) -> Router {
    let submit = || post(handlers::submit).fallback(handlers::method_not_allowed);
    let submissions = || get(handlers::list_submissions).fallback(handlers::method_not_allowed);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/test", get(handlers::backend_test))
        .route("/submit", submit())
        .route("/submissions", submissions())
        // Legacy paths still used by the web frontend
        .route("/api/submit-form", submit())
        .route("/api/submissions", submissions())
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
