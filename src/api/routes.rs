//! HTTP API route definitions.

use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_member, delete_member, get_member, health, index, list_members, metrics_text, AppState,
};
use crate::metrics::track_http_latency;

/// Public endpoints, as listed by the index handler.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/health"),
    ("GET", "/metrics"),
    ("GET", "/members"),
    ("POST", "/members"),
    ("GET", "/members/{id}"),
    ("DELETE", "/members/{id}"),
];

/// Router options that come from configuration.
#[derive(Debug, Clone, Copy)]
pub struct RouterOptions {
    /// Attach a permissive CORS layer.
    pub cors_permissive: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            cors_permissive: true,
        }
    }
}

/// Create the API router with default options.
pub fn create_router(state: AppState) -> Router {
    create_router_with(state, RouterOptions::default())
}

/// Create the API router.
pub fn create_router_with(state: AppState, options: RouterOptions) -> Router {
    let mut router = Router::new()
        .route("/", get(index))
        // Health and metrics
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        // Members, with and without trailing slash
        .route("/members", get(list_members).post(create_member))
        .route("/members/", get(list_members).post(create_member))
        .route("/members/:id", get(get_member).delete(delete_member))
        .route("/members/:id/", get(get_member).delete(delete_member))
        .route_layer(middleware::from_fn(track_http_latency))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if options.cors_permissive {
        router = router.layer(CorsLayer::permissive());
    }

    router
}
