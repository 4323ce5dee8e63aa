//! API Handlers
//!
//! HTTP request handlers. Each one translates a request into exactly one
//! store operation and the result back into a response.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};

use crate::config::Config;
use crate::error::Result;
use crate::models::{HealthResponse, StatsResponse};
use crate::worker::StoreHandle;

/// Index page served at `/`; `{{baseurl}}` is replaced at startup.
const INDEX_TEMPLATE: &str = include_str!("../../static/index.html");

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the store worker
    pub store: StoreHandle,
    /// Prefix for returned bucket locations
    pub base_url: Arc<str>,
    /// Rendered index page
    pub index_html: Arc<str>,
    /// Largest accepted request body, in bytes
    pub max_body_size: usize,
}

impl AppState {
    /// Creates a new AppState around a running store worker.
    pub fn new(store: StoreHandle, config: &Config) -> Self {
        let base_url = config.base_url.trim_end_matches('/');
        // One byte over the cap, so the store itself rejects oversize payloads
        let max_body_size = usize::try_from(config.max_storage_bytes())
            .unwrap_or(usize::MAX)
            .saturating_add(1);
        Self {
            store,
            base_url: Arc::from(base_url),
            index_html: Arc::from(INDEX_TEMPLATE.replace("{{baseurl}}", base_url)),
            max_body_size,
        }
    }

    /// Public location of a bucket.
    pub fn location(&self, key: &str) -> String {
        format!("{}/{}\n", self.base_url, key)
    }
}

/// Handler for GET /
pub async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.index_html.to_string())
}

/// Handler for POST /
///
/// Stores the body under a generated slug and returns its location.
pub async fn set_auto_handler(State(state): State<AppState>, body: Bytes) -> Result<String> {
    let slug = state.store.set_auto(body).await?;
    Ok(state.location(&slug))
}

/// Handler for POST /{key}
///
/// Stores the body under the request path, replacing any existing bucket.
pub async fn set_at_path_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<String> {
    let key = state.store.set_at_path(key, body).await?;
    Ok(state.location(&key))
}

/// Handler for GET /{key}
///
/// Returns the raw payload.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse> {
    let payload = state.store.get(key).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_LENGTH, payload.len().to_string()),
        ],
        payload,
    ))
}

/// Handler for DELETE /{key}
pub async fn delete_handler(State(state): State<AppState>, Path(key): Path<String>) -> Result<()> {
    state.store.delete(key).await
}

/// Handler for GET /_stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.store.stats().await?;
    Ok(Json(StatsResponse::from(stats)))
}

/// Handler for GET /_health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
