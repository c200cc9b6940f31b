// TTL cache tests - public API and expiry property
// Author: kelexine (https://github.com/kelexine)

use ftcbot::cache::{CacheStats, ManualClock, TtlCache};
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn manual_cache() -> (TtlCache<String>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    (TtlCache::with_clock(Duration::from_secs(300), clock.clone()), clock)
}

#[test]
fn test_cache_stats_initialization() {
    let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(300));

    assert_eq!(cache.stats(), CacheStats::default());
    assert!(cache.is_empty());
    assert_eq!(cache.default_ttl(), Duration::from_secs(300));
}

#[test]
fn test_clear_removes_everything() {
    let (cache, _clock) = manual_cache();
    cache.insert("a", "1".to_string());
    cache.insert("b", "2".to_string());
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.get("a").is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_expired_entries_are_not_swept_until_read() {
    let (cache, clock) = manual_cache();
    cache.set("a", "1".to_string(), Duration::from_secs(1));
    clock.advance(Duration::from_secs(5));

    // lazy eviction: still stored, never served
    assert_eq!(cache.len(), 1);
    assert!(cache.get("a").is_none());
    assert_eq!(cache.len(), 0);
}

proptest! {
    #[test]
    fn prop_entry_live_strictly_before_expiry(
        key in "[a-z/]{1,24}",
        value in ".{0,32}",
        ttl_ms in 1u64..100_000,
        before_ms in 0u64..100_000,
        after_ms in 0u64..100_000,
    ) {
        let before_ms = before_ms % ttl_ms;
        let ttl = Duration::from_millis(ttl_ms);

        // read at t0 + before < t0 + ttl: returned unchanged
        let (cache, clock) = manual_cache();
        cache.set(key.clone(), value.clone(), ttl);
        clock.advance(Duration::from_millis(before_ms));
        prop_assert_eq!(cache.get(&key), Some(value.clone()));

        // read at t0 + ttl + after >= t0 + ttl: absent
        let (cache, clock) = manual_cache();
        cache.set(key.clone(), value, ttl);
        clock.advance(ttl + Duration::from_millis(after_ms));
        prop_assert_eq!(cache.get(&key), None);
    }
}
