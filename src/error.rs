//! Error types for the bucket store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Client-facing outcomes of a store operation that are not a success.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Key not present in the store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Payload alone exceeds the aggregate size cap
    #[error("Payload of {size} bytes exceeds the storage limit of {max} bytes")]
    TooLarge { size: u64, max: u64 },

    /// Store worker is no longer running
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Config Error Enum ==
/// Startup misconfiguration. Fatal: the worker never starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("charset must contain at least one character")]
    EmptyCharset,

    #[error("slug size must be at least 1")]
    ZeroSlugSize,

    #[error("max buckets must be at least 1")]
    ZeroMaxBuckets,

    #[error("max storage size must be a finite, non-negative number of MB, got {0}")]
    InvalidStorageSize(f64),

    /// `now + ttl` does not fit in a clock instant
    #[error("ttl of {0} seconds is too large to schedule")]
    InvalidTtl(u64),

    /// `charset_len ^ slug_size` must be strictly greater than `max_buckets`
    #[error(
        "slug size {slug_size} and charset of {charset_len} characters too small for {max_buckets} buckets"
    )]
    KeyspaceTooSmall {
        charset_len: usize,
        slug_size: usize,
        max_buckets: usize,
    },
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
