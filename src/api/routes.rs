//! API Routes
//!
//! Configures the Axum router with all bucket endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, get_handler, health_handler, index_handler, set_at_path_handler,
    set_auto_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Index page
/// - `POST /` - Store the body under a generated slug
/// - `GET /_health` - Health check endpoint
/// - `GET /_stats` - Store statistics
/// - `GET /*key` - Fetch a bucket
/// - `POST /*key` - Store the body under `key`
/// - `DELETE /*key` - Delete a bucket
///
/// `_health` and `_stats` are reserved: those exact paths always reach the
/// service endpoints, so buckets cannot be stored, fetched or deleted under
/// those names (other methods get 405). Longer keys such as `_health/x` or
/// `_stats2` are ordinary buckets.
///
/// # Middleware
/// - Body limit: one byte over the storage cap
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler).post(set_auto_handler))
        .route("/_health", get(health_handler))
        .route("/_stats", get(stats_handler))
        .route(
            "/*key",
            get(get_handler)
                .post(set_at_path_handler)
                .delete(delete_handler),
        )
        .layer(DefaultBodyLimit::max(state.max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
