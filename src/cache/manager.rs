// TTL cache - time-bounded response storage
// Author: kelexine (https://github.com/kelexine)

use crate::cache::clock::{Clock, SystemClock};
use crate::cache::models::{CacheEntry, CacheStats};
use crate::metrics;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Process-local cache with strictly time-based expiry.
///
/// There is no size bound and no background sweep: an expired entry is
/// dropped by the read that discovers it. Locks are held only for the map
/// operation itself, so a read-miss followed by a write is not atomic and
/// concurrent misses for one key simply race to store (last write wins).
pub struct TtlCache<V> {
    default_ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    stats: RwLock<CacheStats>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache backed by the system clock
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(default_ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            default_ttl,
            entries: RwLock::new(HashMap::new()),
            stats: RwLock::new(CacheStats::default()),
            clock,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Look up a live entry, dropping it if it has expired
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();

        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => {
                    debug!("Cache hit: {}", key);
                    self.stats.write().hits += 1;
                    metrics::record_cache_operation("hit");
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => {
                    self.stats.write().misses += 1;
                    metrics::record_cache_operation("miss");
                    return None;
                }
            }
        }

        // Re-check under the write lock; another task may have refreshed it.
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get(key) {
            if entry.is_live(now) {
                self.stats.write().hits += 1;
                metrics::record_cache_operation("hit");
                return Some(entry.value.clone());
            }
            entries.remove(key);
        }
        debug!("Cache entry expired: {}", key);
        self.stats.write().expired += 1;
        metrics::record_cache_operation("expired");
        metrics::update_cache_entries(entries.len());
        None
    }

    /// Store a value, replacing any existing entry for the key
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        let entry = CacheEntry::new(key.clone(), value, self.clock.now(), ttl);

        let mut entries = self.entries.write();
        entries.insert(key, entry);
        self.stats.write().stores += 1;
        metrics::record_cache_operation("store");
        metrics::update_cache_entries(entries.len());
    }

    /// Store a value with the cache's default TTL
    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.set(key, value, self.default_ttl);
    }

    /// Number of stored entries, including expired ones not yet read
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.read().clone()
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        self.entries.write().clear();
        metrics::update_cache_entries(0);
        debug!("Cache cleared");
    }
}
