//! Store Module
//!
//! In-memory bucket storage with TTL expiry, oldest-first eviction under
//! count and size caps, and random slug generation.

mod bucket_store;
mod entry;
mod eviction;
mod slug;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use bucket_store::BucketStore;
pub use entry::Entry;
pub use eviction::{evictions_needed, StoreLimits};
pub use slug::SlugGenerator;
pub use stats::StoreStats;
