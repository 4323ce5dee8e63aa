//! Buckets - An ephemeral in-memory blob store
//!
//! Stores uploaded payloads under random slugs or caller-chosen paths, expires
//! them after a TTL, and evicts the oldest under count and size caps.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod worker;

pub use api::AppState;
pub use config::Config;
pub use worker::{spawn_store_worker, StoreHandle};
