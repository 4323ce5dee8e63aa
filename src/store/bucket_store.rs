//! Bucket Store Module
//!
//! Main store engine: content map, insertion-ordered eviction queue, TTL
//! expiry and size/count eviction. Owned by exactly one worker task.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;
use tracing::debug;

use crate::config::Config;
use crate::error::{ConfigError, Result, StoreError};
use crate::store::{evictions_needed, Entry, SlugGenerator, StoreLimits, StoreStats};

// == Bucket Store ==
/// In-memory bucket storage with TTL expiry and oldest-first eviction.
#[derive(Debug)]
pub struct BucketStore {
    /// Payloads by key
    contents: HashMap<String, Bytes>,
    /// Entries in insertion order; front is oldest and expires first
    queue: VecDeque<Entry>,
    /// Sum of all entry sizes
    total_size: u64,
    /// Entry lifetime, None = unlimited
    ttl: Option<Duration>,
    limits: StoreLimits,
    slugs: SlugGenerator,
    stats: StoreStats,
}

impl BucketStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `limits` - Entry count and aggregate size caps
    /// * `ttl` - Entry lifetime, None for entries that never expire
    /// * `slugs` - Generator for anonymous keys
    pub fn new(limits: StoreLimits, ttl: Option<Duration>, slugs: SlugGenerator) -> Self {
        Self {
            contents: HashMap::new(),
            queue: VecDeque::new(),
            total_size: 0,
            ttl,
            limits,
            slugs,
            stats: StoreStats::new(),
        }
    }

    /// Validates `config` and builds an empty store from it.
    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let limits = StoreLimits {
            max_entries: config.max_buckets,
            max_size: config.max_storage_bytes(),
        };
        let slugs = SlugGenerator::new(config.charset_chars(), config.slug_size, config.seed);
        Ok(Self::new(limits, config.ttl_duration(), slugs))
    }

    // == Get ==
    /// Retrieves a payload by key.
    pub fn get(&mut self, key: &str) -> Result<Bytes> {
        match self.contents.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Ok(value.clone())
            }
            None => {
                self.stats.record_miss();
                Err(StoreError::NotFound(key.to_string()))
            }
        }
    }

    /// Payload for `key` without recording a hit or miss.
    pub fn peek(&self, key: &str) -> Option<&Bytes> {
        self.contents.get(key)
    }

    // == Delete ==
    /// Removes a bucket by key.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        if !self.contents.contains_key(key) {
            return Err(StoreError::NotFound(key.to_string()));
        }
        self.remove_key(key);
        Ok(())
    }

    // == Set Auto ==
    /// Stores a payload under a freshly generated, currently unused slug.
    pub fn set_auto(&mut self, value: Bytes, now: Instant) -> Result<String> {
        let contents = &self.contents;
        let key = self.slugs.generate(|slug| contents.contains_key(slug));
        self.check_size(&value)?;
        Ok(self.insert(key, value, now))
    }

    // == Set At Path ==
    /// Stores a payload under a caller-chosen key.
    ///
    /// An existing bucket under `key` is removed first, so the new one goes to
    /// the back of the eviction queue with a fresh expiry.
    pub fn set_at_path(&mut self, key: String, value: Bytes, now: Instant) -> Result<String> {
        self.check_size(&value)?;
        if self.contents.contains_key(&key) {
            self.remove_key(&key);
        }
        Ok(self.insert(key, value, now))
    }

    // == Expire Due ==
    /// Drops every entry whose expiry has been reached at `now`, one front
    /// entry at a time. Returns the number removed.
    pub fn expire_due(&mut self, now: Instant) -> usize {
        let mut removed = 0;
        while self.queue.front().is_some_and(|entry| entry.is_expired(now)) {
            if let Some(entry) = self.pop_front() {
                debug!("Expired bucket {} ({} bytes)", entry.key, entry.size);
            }
            self.stats.record_expiration();
            removed += 1;
        }
        removed
    }

    // == Next Expiry ==
    /// Instant at which the oldest entry expires, if any entry ever does.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.queue.front().and_then(|entry| entry.expires_at)
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.set_footprint(self.queue.len(), self.total_size);
        stats
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Aggregate payload size in bytes.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Keys in eviction order, oldest first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(|entry| entry.key.as_str())
    }

    pub fn limits(&self) -> StoreLimits {
        self.limits
    }

    #[cfg(test)]
    pub(crate) fn content_len(&self) -> usize {
        self.contents.len()
    }

    // == Internals ==
    fn check_size(&self, value: &Bytes) -> Result<()> {
        let size = value.len() as u64;
        if size > self.limits.max_size {
            return Err(StoreError::TooLarge {
                size,
                max: self.limits.max_size,
            });
        }
        Ok(())
    }

    /// Makes room for `value` and appends it. The payload must already have
    /// passed `check_size`.
    fn insert(&mut self, key: String, value: Bytes, now: Instant) -> String {
        let size = value.len() as u64;
        let evict = evictions_needed(
            self.queue.iter().map(|entry| entry.size),
            self.queue.len(),
            self.total_size,
            size,
            self.limits,
        );
        for _ in 0..evict {
            if let Some(entry) = self.pop_front() {
                debug!("Evicted bucket {} ({} bytes)", entry.key, entry.size);
            }
        }
        self.stats.record_evictions(evict);

        self.queue
            .push_back(Entry::new(key.clone(), size, self.ttl, now));
        self.contents.insert(key.clone(), value);
        self.total_size += size;
        key
    }

    fn pop_front(&mut self) -> Option<Entry> {
        let entry = self.queue.pop_front()?;
        self.contents.remove(&entry.key);
        self.total_size -= entry.size;
        Some(entry)
    }

    /// Removes a live key from the queue and content map.
    ///
    /// # Panics
    /// Panics if the key is not in the queue; that means the content map and
    /// queue have diverged.
    fn remove_key(&mut self, key: &str) {
        let Some(index) = self.queue.iter().position(|entry| entry.key == key) else {
            panic!("store invariant violated: key {key:?} missing from eviction queue");
        };
        if let Some(entry) = self.queue.remove(index) {
            self.total_size -= entry.size;
        }
        self.contents.remove(key);
    }
}
