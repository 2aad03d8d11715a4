//! API Routes
//!
//! Configures the Axum router with all server endpoints.

use axum::{
    http::{header, HeaderValue},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use super::handlers::{
    clear_cache_handler, create_profile_handler, get_profile_handler, health_handler,
    reward_handler, stats_handler, status_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /status` - Executor status snapshot
/// - `GET /stats` - Result cache statistics
/// - `DELETE /cache` - Clear the result cache
/// - `GET /profile/:user_id` - Read a profile (cached)
/// - `PUT /profile/:user_id` - Register an empty profile
/// - `POST /reward` - Credit points for an action
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - No-cache headers on every response, so browsers and proxies never serve
///   stale status or profile data
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/status", get(status_handler))
        .route("/stats", get(stats_handler))
        .route("/cache", delete(clear_cache_handler))
        .route(
            "/profile/:user_id",
            get(get_profile_handler).put(create_profile_handler),
        )
        .route("/reward", post(reward_handler))
        .route("/health", get(health_handler))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
