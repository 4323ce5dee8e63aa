//! Bucket Entry Module
//!
//! Defines the queue record kept for every stored bucket.

use std::time::Duration;

use tokio::time::Instant;

// == Entry ==
/// Eviction-queue record for a single bucket.
///
/// The payload itself lives in the store's content map; the entry carries
/// everything needed to order, account for, and expire it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Bucket identifier
    pub key: String,
    /// Payload length in bytes
    pub size: u64,
    /// Absolute expiry instant, None = never expires
    pub expires_at: Option<Instant>,
}

impl Entry {
    // == Constructor ==
    /// Creates an entry inserted at `now` with an optional lifetime.
    ///
    /// A lifetime whose deadline cannot be represented never expires.
    pub fn new(key: String, size: u64, ttl: Option<Duration>, now: Instant) -> Self {
        Self {
            key,
            size,
            expires_at: ttl.and_then(|ttl| now.checked_add(ttl)),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now` reaches its expiry
    /// instant, not only after it.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation_no_ttl() {
        let now = Instant::now();
        let entry = Entry::new("abcd".to_string(), 5, None, now);

        assert_eq!(entry.key, "abcd");
        assert_eq!(entry.size, 5);
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired(now + Duration::from_secs(1_000_000)));
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let now = Instant::now();
        let entry = Entry::new("abcd".to_string(), 5, Some(Duration::from_secs(60)), now);

        assert_eq!(entry.expires_at, Some(now + Duration::from_secs(60)));
        assert!(!entry.is_expired(now + Duration::from_secs(59)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = Entry::new("abcd".to_string(), 1, Some(Duration::from_secs(10)), now);

        // Expired exactly at the deadline
        assert!(entry.is_expired(now + Duration::from_secs(10)));
        assert!(!entry.is_expired(now + Duration::from_secs(9)));
    }

    #[test]
    fn test_unrepresentable_deadline_never_expires() {
        let now = Instant::now();
        let entry = Entry::new("abcd".to_string(), 1, Some(Duration::MAX), now);

        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired(now + Duration::from_secs(1_000_000)));
    }
}
