//! Configuration Module
//!
//! Handles loading and validating server configuration from `BUCKETS_*`
//! environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tokio::time::Instant;
use tracing::warn;

use crate::error::ConfigError;

/// Bytes per configured storage megabyte.
pub const BYTES_PER_MB: f64 = 1_000_000.0;

/// Server configuration parameters.
///
/// Read once at startup, validated, then treated as immutable.
#[derive(Debug, Clone)]
pub struct Config {
    /// Prefix used to build the locations returned for stored buckets
    pub base_url: String,
    /// Characters that slugs are drawn from
    pub charset: String,
    /// Number of characters in a generated slug
    pub slug_size: usize,
    /// Time to live in seconds, 0 means unlimited
    pub ttl: u64,
    /// Maximum number of stored buckets
    pub max_buckets: usize,
    /// Maximum aggregate payload size in MB
    pub max_storage_size: f64,
    /// Fixed random seed for slug generation
    pub seed: Option<u64>,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `BUCKETS_BASE_URL` - Location prefix (default: http://localhost:8080)
    /// - `BUCKETS_CHARSET` - Slug characters (default: a-z)
    /// - `BUCKETS_SLUG_SIZE` - Slug length (default: 4)
    /// - `BUCKETS_TTL` - TTL in seconds, 0 = unlimited (default: 172800)
    /// - `BUCKETS_MAX_BUCKETS` - Entry count cap (default: 1000)
    /// - `BUCKETS_MAX_STORAGE_SIZE` - Aggregate size cap in MB (default: 1000)
    /// - `BUCKETS_SEED` - Random seed (default: none)
    /// - `BUCKETS_PORT` - HTTP server port (default: 8080)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: non_empty_var("BUCKETS_BASE_URL").unwrap_or(defaults.base_url),
            charset: non_empty_var("BUCKETS_CHARSET").unwrap_or(defaults.charset),
            slug_size: parse_var("BUCKETS_SLUG_SIZE").unwrap_or(defaults.slug_size),
            ttl: parse_var("BUCKETS_TTL").unwrap_or(defaults.ttl),
            max_buckets: parse_var("BUCKETS_MAX_BUCKETS").unwrap_or(defaults.max_buckets),
            max_storage_size: parse_var("BUCKETS_MAX_STORAGE_SIZE")
                .unwrap_or(defaults.max_storage_size),
            seed: parse_var("BUCKETS_SEED"),
            server_port: parse_var("BUCKETS_PORT").unwrap_or(defaults.server_port),
        }
    }

    /// Checks that the configuration can back a running store.
    ///
    /// The slug keyspace must be strictly larger than the bucket cap so that
    /// slug generation always finds a free identifier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let charset_len = self.charset_chars().len();
        if charset_len == 0 {
            return Err(ConfigError::EmptyCharset);
        }
        if self.slug_size == 0 {
            return Err(ConfigError::ZeroSlugSize);
        }
        if self.max_buckets == 0 {
            return Err(ConfigError::ZeroMaxBuckets);
        }
        if !self.max_storage_size.is_finite() || self.max_storage_size < 0.0 {
            return Err(ConfigError::InvalidStorageSize(self.max_storage_size));
        }
        if let Some(ttl) = self.ttl_duration() {
            if Instant::now().checked_add(ttl).is_none() {
                return Err(ConfigError::InvalidTtl(self.ttl));
            }
        }
        if !keyspace_exceeds(charset_len, self.slug_size, self.max_buckets) {
            return Err(ConfigError::KeyspaceTooSmall {
                charset_len,
                slug_size: self.slug_size,
                max_buckets: self.max_buckets,
            });
        }
        Ok(())
    }

    /// Distinct charset characters, in first-seen order.
    pub fn charset_chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = Vec::new();
        for c in self.charset.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }
        chars
    }

    /// Aggregate size cap in bytes.
    pub fn max_storage_bytes(&self) -> u64 {
        (self.max_storage_size * BYTES_PER_MB).round() as u64
    }

    /// Entry lifetime, `None` when entries never expire.
    pub fn ttl_duration(&self) -> Option<Duration> {
        (self.ttl > 0).then(|| Duration::from_secs(self.ttl))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            charset: "abcdefghijklmnopqrstuvwxyz".to_string(),
            slug_size: 4,
            ttl: 172_800,
            max_buckets: 1000,
            max_storage_size: 1000.0,
            seed: None,
            server_port: 8080,
        }
    }
}

// == Utility Functions ==
/// True when `base ^ exp > bound`. Overflow means the keyspace is larger than
/// any `usize` bound.
fn keyspace_exceeds(base: usize, exp: usize, bound: usize) -> bool {
    let Ok(exp) = u32::try_from(exp) else {
        return base > 1;
    };
    match base.checked_pow(exp) {
        Some(keyspace) => keyspace > bound,
        None => true,
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

/// Parses an env var, keeping the default (and logging) when it is malformed.
fn parse_var<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = non_empty_var(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}
