//! Response models for the bucket server API
//!
//! JSON documents returned by the health and stats endpoints. Bucket
//! payloads themselves travel as raw bytes.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
