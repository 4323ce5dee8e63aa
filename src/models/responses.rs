//! Response DTOs for the bucket server API
//!
//! Defines the structure of outgoing JSON response bodies.

use serde::Serialize;

use crate::store::StoreStats;

/// Response body for the stats endpoint (GET /_stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of lookups for absent keys
    pub misses: u64,
    /// Number of cap-driven evictions
    pub evictions: u64,
    /// Number of TTL expirations
    pub expirations: u64,
    /// Current number of stored buckets
    pub total_entries: usize,
    /// Current aggregate payload size in bytes
    pub total_size: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<StoreStats> for StatsResponse {
    fn from(stats: StoreStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            total_size: stats.total_size,
        }
    }
}

/// Response body for the health endpoint (GET /_health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
