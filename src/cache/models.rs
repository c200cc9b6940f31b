//! Cache entry and statistics models.

// Author: kelexine (https://github.com/kelexine)

use serde::Serialize;
use std::time::{Duration, Instant};

/// A stored value and the instant after which it must not be served.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// Request URL or logical identifier.
    pub key: String,
    pub value: V,
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn new(key: impl Into<String>, value: V, now: Instant, ttl: Duration) -> Self {
        Self {
            key: key.into(),
            value,
            expires_at: now + ttl,
        }
    }

    /// An entry is live strictly before its expiry instant.
    pub fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Statistics for cache operations.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads that returned a live entry.
    pub hits: u64,
    /// Reads that found nothing.
    pub misses: u64,
    /// Reads that found an entry past its expiry (and dropped it).
    pub expired: u64,
    /// Writes, including overwrites.
    pub stores: u64,
}
