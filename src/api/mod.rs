//! API Module
//!
//! HTTP gateway over the store worker.
//!
//! # Endpoints
//! - `GET /` - Index page
//! - `POST /` - Store a bucket under a generated slug
//! - `GET|POST|DELETE /*key` - Fetch, store or delete a bucket by key
//! - `GET /_stats` - Store statistics
//! - `GET /_health` - Health check endpoint
//!
//! The exact keys `_health` and `_stats` are reserved for these endpoints.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
