//! In-memory listing cache with per-entry expiry
//!
//! Entries expire lazily: an expired entry is dropped by the lookup that
//! finds it. There is no background sweep and no size bound.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::trace;

/// A cached value and the moment it stops being served
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// String-keyed cache with a fixed time-to-live
///
/// Concurrent misses on the same key are not coalesced; both callers fetch
/// and the later `set` wins.
#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    /// Create an empty cache whose entries live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Time-to-live applied by [`set`](Self::set)
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a live entry
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Store a value, replacing any previous entry for the key
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_at(key, value, Instant::now());
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if now < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                trace!(key, "Cache entry expired");
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set_at(&self, key: impl Into<String>, value: V, now: Instant) {
        let entry = CacheEntry {
            value,
            expires_at: now + self.ttl,
        };
        self.lock().insert(key.into(), entry);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_after_set_returns_value() {
        let cache = TtlCache::new(Duration::from_secs(300));
        cache.set("issues:acme/api", vec![1, 2, 3]);
        assert_eq!(cache.get("issues:acme/api"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_missing_key_is_absent() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(300));
        assert_eq!(cache.get("repos:acme"), None);
    }

    #[test]
    fn test_expired_entry_is_absent_and_removed() {
        let cache = TtlCache::new(Duration::from_secs(300));
        let start = Instant::now();
        cache.set_at("pulls:acme/api", "cached", start);

        let before = start + Duration::from_secs(299);
        assert_eq!(cache.get_at("pulls:acme/api", before), Some("cached"));
        assert_eq!(cache.len(), 1);

        let after = start + Duration::from_secs(300);
        assert_eq!(cache.get_at("pulls:acme/api", after), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_replaces_and_restarts_ttl() {
        let cache = TtlCache::new(Duration::from_secs(10));
        let start = Instant::now();
        cache.set_at("k", 1, start);
        cache.set_at("k", 2, start + Duration::from_secs(8));

        assert_eq!(cache.get_at("k", start + Duration::from_secs(15)), Some(2));
    }

    #[test]
    fn test_clear_empties_cache() {
        let cache = TtlCache::new(Duration::from_secs(300));
        cache.set("a", 1);
        cache.set("b", 2);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }
}
