use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Key-value store injected into collaborators that want to reuse fetched data.
pub trait Cache<V>: Send + Sync {
    fn get(&self, key: &str) -> Option<V>;
    fn set(&self, key: String, value: V);
}

/// A thread-safe cache storing `(stored_at, value)` and checking age on read.
pub struct TtlCache<V> {
    data: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            data: DashMap::new(),
            ttl,
        }
    }

    /// Remove a value from the cache.
    pub fn remove(&self, key: &str) -> Option<V> {
        self.data.remove(key).map(|(_, entry)| entry.value)
    }

    /// Remove all expired entries.
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.data.retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }

    /// Number of entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<V: Clone + Send + Sync> Cache<V> for TtlCache<V> {
    fn get(&self, key: &str) -> Option<V> {
        let entry = self.data.get(key)?;
        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.value.clone())
        } else {
            drop(entry);
            self.data.remove(key);
            None
        }
    }

    fn set(&self, key: String, value: V) {
        self.data.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }
}
