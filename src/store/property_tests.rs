//! Property-Based Tests for Store Module
//!
//! Uses proptest to check store invariants across random operation sequences.

use std::collections::HashSet;
use std::time::Duration;

use bytes::Bytes;
use proptest::prelude::*;
use tokio::time::Instant;

use crate::error::StoreError;
use crate::store::{BucketStore, SlugGenerator, StoreLimits};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 20;
const TEST_MAX_SIZE: u64 = 512;
const TEST_TTL: Duration = Duration::from_secs(60);
const TEST_CHARSET: &str = "abcdefghijklmnopqrstuvwxyz";
const TEST_SLUG_SIZE: usize = 4;

fn new_store(max_entries: usize, max_size: u64, seed: u64) -> BucketStore {
    let slugs = SlugGenerator::new(TEST_CHARSET.chars().collect(), TEST_SLUG_SIZE, Some(seed));
    BucketStore::new(
        StoreLimits {
            max_entries,
            max_size,
        },
        Some(TEST_TTL),
        slugs,
    )
}

// == Strategies ==
/// Caller-chosen keys drawn from a small pool so overwrites happen often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,2}".prop_map(|s| s)
}

/// Payloads up to the size cap
fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=TEST_MAX_SIZE as usize)
}

#[derive(Debug, Clone)]
enum StoreOp {
    SetAuto { value: Vec<u8> },
    SetAtPath { key: String, value: Vec<u8> },
    Get { key: String },
    Delete { key: String },
    Tick { secs: u64 },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        payload_strategy().prop_map(|value| StoreOp::SetAuto { value }),
        (key_strategy(), payload_strategy())
            .prop_map(|(key, value)| StoreOp::SetAtPath { key, value }),
        key_strategy().prop_map(|key| StoreOp::Get { key }),
        key_strategy().prop_map(|key| StoreOp::Delete { key }),
        (0u64..40).prop_map(|secs| StoreOp::Tick { secs }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Round trip: a stored payload reads back byte for byte
    #[test]
    fn prop_roundtrip_storage(value in payload_strategy(), seed in any::<u64>()) {
        let mut store = new_store(TEST_MAX_ENTRIES, TEST_MAX_SIZE, seed);
        let now = Instant::now();

        let key = store.set_auto(Bytes::from(value.clone()), now).unwrap();
        prop_assert_eq!(store.get(&key).unwrap(), Bytes::from(value));
    }

    // Overwrite: the second value wins and the key moves to the back
    #[test]
    fn prop_overwrite_semantics(
        others in prop::collection::vec(payload_strategy(), 1..5),
        value1 in payload_strategy(),
        value2 in payload_strategy()
    ) {
        let mut store = new_store(TEST_MAX_ENTRIES, u64::MAX, 1);
        let now = Instant::now();

        store.set_at_path("path".to_string(), Bytes::from(value1), now).unwrap();
        for value in others {
            store.set_auto(Bytes::from(value), now).unwrap();
        }
        store.set_at_path("path".to_string(), Bytes::from(value2.clone()), now).unwrap();

        prop_assert_eq!(store.get("path").unwrap(), Bytes::from(value2));
        prop_assert_eq!(store.keys().last(), Some("path"));
        prop_assert_eq!(store.keys().filter(|k| *k == "path").count(), 1);
    }

    // Oversize payloads are rejected without touching the store
    #[test]
    fn prop_oversize_rejected(
        existing in payload_strategy(),
        extra in 1usize..64,
        use_path in any::<bool>()
    ) {
        let mut store = new_store(TEST_MAX_ENTRIES, TEST_MAX_SIZE, 2);
        let now = Instant::now();
        store.set_at_path("keep".to_string(), Bytes::from(existing), now).unwrap();
        let size_before = store.total_size();

        let payload = Bytes::from(vec![0u8; TEST_MAX_SIZE as usize + extra]);
        let result = if use_path {
            store.set_at_path("keep".to_string(), payload, now)
        } else {
            store.set_auto(payload, now)
        };

        let is_too_large = matches!(result, Err(StoreError::TooLarge { .. }));
        prop_assert!(is_too_large);
        prop_assert_eq!(store.total_size(), size_before);
        prop_assert_eq!(store.len(), 1);
    }

    // Count cap: exactly the earliest entries are dropped
    #[test]
    fn prop_count_cap_drops_earliest(cap in 1usize..15, extra in 1usize..10) {
        let mut store = new_store(cap, u64::MAX, 3);
        let now = Instant::now();

        let keys: Vec<String> = (0..cap + extra)
            .map(|i| store.set_at_path(format!("k{i}"), Bytes::from_static(b"x"), now).unwrap())
            .collect();

        prop_assert_eq!(store.len(), cap);
        let survivors: Vec<&str> = store.keys().collect();
        let expected: Vec<&str> = keys[extra..].iter().map(String::as_str).collect();
        prop_assert_eq!(survivors, expected);
    }

    // Generated slugs have the configured shape and never collide with live keys
    #[test]
    fn prop_slug_uniqueness(count in 1usize..60, seed in any::<u64>()) {
        let mut store = new_store(TEST_MAX_ENTRIES, TEST_MAX_SIZE, seed);
        let now = Instant::now();

        for _ in 0..count {
            let live: HashSet<String> = store.keys().map(str::to_string).collect();
            let key = store.set_auto(Bytes::from_static(b"v"), now).unwrap();
            prop_assert!(!live.contains(&key), "slug {} collided with a live key", key);
            prop_assert_eq!(key.chars().count(), TEST_SLUG_SIZE);
            prop_assert!(key.chars().all(|c| TEST_CHARSET.contains(c)));
        }
    }

    // Structural invariants hold after any operation sequence
    #[test]
    fn prop_invariants_hold(ops in prop::collection::vec(store_op_strategy(), 1..80)) {
        let mut store = new_store(5, TEST_MAX_SIZE, 4);
        let mut now = Instant::now();

        for op in ops {
            match op {
                StoreOp::SetAuto { value } => {
                    store.set_auto(Bytes::from(value), now).unwrap();
                }
                StoreOp::SetAtPath { key, value } => {
                    store.set_at_path(key, Bytes::from(value), now).unwrap();
                }
                StoreOp::Get { key } => {
                    let _ = store.get(&key);
                }
                StoreOp::Delete { key } => {
                    let _ = store.delete(&key);
                }
                StoreOp::Tick { secs } => {
                    now += Duration::from_secs(secs);
                    store.expire_due(now);
                }
            }

            prop_assert!(store.len() <= 5);
            prop_assert!(store.total_size() <= TEST_MAX_SIZE);

            let keys: Vec<&str> = store.keys().collect();
            let unique: HashSet<&str> = keys.iter().copied().collect();
            prop_assert_eq!(unique.len(), keys.len(), "duplicate key in queue");

            // Content map and queue describe the same keys
            prop_assert_eq!(store.content_len(), keys.len());
            let mut size_sum = 0u64;
            for key in &keys {
                let payload = store.peek(key);
                prop_assert!(payload.is_some(), "queued key {} without content", key);
                size_sum += payload.map_or(0, |p| p.len() as u64);
            }
            prop_assert_eq!(size_sum, store.total_size());
        }
    }
}
