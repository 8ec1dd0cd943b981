//! In-memory TTL cache backed by `DashMap` for concurrent access.

use dashmap::DashMap;
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Thread-safe in-memory cache with time-to-live expiration.
///
/// [`crate::CachedClient`] stores raw page bodies keyed by request URL.
/// Expired entries are lazily evicted on the next `get` for that key.
pub struct MemoryCache<V = String> {
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
        if Instant::now() >= entry.expires_at {
            drop(entry);
            self.store.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Inserts or overwrites an entry. The entry expires after the configured TTL.
    pub fn set(&self, key: String, value: V) {
        self.store.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    pub fn remove(&self, key: &str) -> Option<V> {
        self.store.remove(key).map(|(_, entry)| entry.value)
    }

    /// Number of stored entries, expired ones not yet evicted included.
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
