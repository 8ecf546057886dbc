//! In-memory TTL cache backed by `DashMap` for concurrent access.

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// A single cached value with its expiration time.
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Thread-safe in-memory cache with time-to-live expiration.
///
/// Expired entries are lazily evicted on the next `get` call for that key,
/// or in bulk by [`MemoryCache::purge_expired`].
pub struct MemoryCache<V> {
    store: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

impl<V: Clone> MemoryCache<V> {
    /// Creates a new cache with the given time-to-live for entries.
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value for `key`, or `None` if missing or expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.store.get(key)?;
        if Instant::now() > entry.expires_at {
            drop(entry);
            self.store.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Inserts or overwrites a cache entry. The entry expires after the configured TTL.
    pub fn set(&self, key: String, value: V) {
        self.store.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Removes one entry, returning its value if it was still live.
    pub fn remove(&self, key: &str) -> Option<V> {
        let (_, entry) = self.store.remove(key)?;
        if Instant::now() > entry.expires_at {
            return None;
        }
        Some(entry.value)
    }

    /// Keeps only the entries for which `keep` returns true.
    pub fn retain(&self, mut keep: impl FnMut(&V) -> bool) {
        self.store.retain(|_, entry| keep(&entry.value));
    }

    /// Drops every expired entry.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.store.retain(|_, entry| entry.expires_at >= now);
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Removes all entries from the cache.
    pub fn clear(&self) {
        self.store.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_set_and_get() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("key1".to_string(), 7_u32);
        assert_eq!(cache.get("key1"), Some(7));
    }

    #[test]
    fn cache_miss() {
        let cache: MemoryCache<u32> = MemoryCache::new(Duration::from_secs(60));
        assert_eq!(cache.get("nonexistent"), None);
    }

    #[test]
    fn cache_expiration() {
        let cache = MemoryCache::new(Duration::from_millis(1));
        cache.set("key1".to_string(), "value1".to_string());
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(cache.get("key1"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_remove_returns_live_value() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("a".to_string(), 1);
        assert_eq!(cache.remove("a"), Some(1));
        assert_eq!(cache.remove("a"), None);
    }

    #[test]
    fn cache_retain_filters_by_value() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);
        cache.set("c".to_string(), 1);
        cache.retain(|v| *v != 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("b"), Some(2));
    }

    #[test]
    fn cache_purge_expired() {
        let cache = MemoryCache::new(Duration::from_millis(1));
        cache.set("a".to_string(), 1);
        std::thread::sleep(Duration::from_millis(10));
        cache.purge_expired();
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_clear() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);
        cache.clear();
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
    }
}
