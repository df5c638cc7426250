//! Router configuration for the HTTP API.
//!
//! Sets up routes and middleware (CORS, compression, tracing) and returns
//! an axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS for development; restrict in production deployments.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/trigger_report", post(handlers::trigger_report))
        .route("/get_report", get(handlers::get_report))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn router_builds() {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn crate::db::StoreDataRepository>;
        let state = AppState::new(repo, std::env::temp_dir(), 2);
        let _router = create_router(state);
    }
}
