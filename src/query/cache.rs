use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::query::key::QueryKey;

/// Default lifetime of a cached response.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

#[derive(Clone)]
struct Entry {
    stored_at: Instant,
    value: Arc<dyn Any + Send + Sync>,
}

/// Process-wide store of query results.
///
/// Values of any type live side by side; a lookup with the wrong type is a miss.
pub struct QueryCache {
    entries: DashMap<QueryKey, Entry>,
    ttl: Duration,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh value stored under `key`. Expired entries are evicted on read.
    pub fn get<T>(&self, key: &QueryKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entry = self.entries.get(key)?.clone();
        if entry.stored_at.elapsed() >= self.ttl {
            self.entries.remove(key);
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    /// Stores `value` under `key` and sweeps out every expired entry, so keys
    /// that are never read again do not pile up.
    pub fn insert<T>(&self, key: QueryKey, value: T)
    where
        T: Send + Sync + 'static,
    {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        self.entries.insert(
            key,
            Entry {
                stored_at: Instant::now(),
                value: Arc::new(value),
            },
        );
    }

    /// Drops every entry under `prefix` and returns how many there were.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        before.saturating_sub(self.entries.len())
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.entries.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_lookup() {
        let cache = QueryCache::default();
        let key = QueryKey::new("holidays");
        cache.insert(key.clone(), vec![1u32, 2]);
        assert_eq!(cache.get::<Vec<u32>>(&key), Some(vec![1, 2]));
        assert_eq!(cache.get::<String>(&key), None);
    }

    #[test]
    fn expired_entries_are_misses() {
        let cache = QueryCache::new(Duration::ZERO);
        let key = QueryKey::new("holidays");
        cache.insert(key.clone(), 1u8);
        assert_eq!(cache.get::<u8>(&key), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_sweeps_entries_nobody_reads_again() {
        let cache = QueryCache::new(Duration::from_millis(1));
        for term in 0..1000 {
            cache.insert(QueryKey::new("members").with("all").with(term), 1u8);
        }
        std::thread::sleep(Duration::from_millis(20));

        cache.insert(QueryKey::new("members").with("all").with("asha"), 2u8);

        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidation_by_prefix() {
        let cache = QueryCache::default();
        cache.insert(QueryKey::new("members").with("all").with(0), 1u8);
        cache.insert(QueryKey::new("members").with("unpaid"), 2u8);
        cache.insert(QueryKey::new("payments").with("pending"), 3u8);

        assert_eq!(cache.invalidate(&QueryKey::new("members")), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get::<u8>(&QueryKey::new("payments").with("pending")),
            Some(3)
        );
    }
}
