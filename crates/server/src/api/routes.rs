use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, middleware::metrics_middleware, overrides};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Destinations
        .route("/destinations", get(overrides::list_destinations))
        .route(
            "/destinations/{name}/overrides",
            put(overrides::replace_overrides),
        )
        .route(
            "/destinations/{name}/overrides/{tmdb_id}",
            get(overrides::get_override),
        )
        // Pure resolution, no metadata lookup
        .route("/overrides/resolve", post(overrides::resolve))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
