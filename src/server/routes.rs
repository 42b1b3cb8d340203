//! Application routing
//!
//! This module defines all HTTP routes for the application.

use axum::{
    http::{HeaderName, HeaderValue},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::api::{chat, health, moltbook};
use crate::config::CorsConfig;
use crate::middleware::{log_request, REQUEST_ID_HEADER, TRACE_ID_HEADER};
use crate::server::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness))
        .route("/liveness", get(health::liveness));

    let moltbook_routes = Router::new()
        .route("/submolts", get(moltbook::submolts))
        .route("/posts", get(moltbook::posts))
        .route("/agents", get(moltbook::agents))
        .route("/stats", get(moltbook::stats));

    let cors = create_cors_layer(&state.settings.cors);

    Router::new()
        .route("/chat", post(chat::chat))
        .nest("/api/moltbook", moltbook_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Any origin when no list is configured, otherwise exactly the listed ones
fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            HeaderName::from_static(TRACE_ID_HEADER),
            HeaderName::from_static(REQUEST_ID_HEADER),
        ]);

    if config.is_permissive() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
