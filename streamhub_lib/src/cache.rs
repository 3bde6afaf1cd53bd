//! In-memory TTL cache backed by `DashMap` for concurrent access.

use std::future::Future;
use std::time::{Duration, Instant};

use dashmap::DashMap;

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Session cache for lookups that do not change while browsing (category
/// lists, series details). Expired entries are evicted lazily on lookup.
pub struct MemoryCache<V> {
    store: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

impl<V: Clone> MemoryCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
        }
    }

    /// Returns a clone of the live value for `key`.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.store.get(key)?;
        if Instant::now() > entry.expires_at {
            drop(entry);
            self.store.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    pub fn set(&self, key: String, value: V) {
        self.store.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Serves `key` from memory, or runs `fetch` and stores what it returns.
    /// Errors are passed through and never cached, so the next call retries.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(cached) = self.get(key) {
            tracing::debug!("Cache hit for {}", key);
            return Ok(cached);
        }
        let value = fetch().await?;
        self.set(key.to_string(), value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use streamhub_api::types::Category;

    use super::*;

    fn news() -> Vec<Category> {
        vec![Category {
            id: Some("1".to_string()),
            name: "News".to_string(),
        }]
    }

    #[test]
    fn category_lists_are_keyed_per_domain() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        cache.set("categories:movies".to_string(), news());
        assert_eq!(cache.get("categories:movies"), Some(news()));
        assert_eq!(cache.get("categories:live-tv"), None);
    }

    #[test]
    fn expired_entry_is_a_miss() {
        let cache = MemoryCache::new(Duration::from_millis(1));
        cache.set("categories:series".to_string(), news());
        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(cache.get("categories:series"), None);
    }

    #[tokio::test]
    async fn fetch_runs_once_per_key() {
        let cache = MemoryCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            let got = cache
                .get_or_fetch("categories:movies", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(news())
                })
                .await
                .unwrap();
            assert_eq!(got, news());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let cache: MemoryCache<Vec<Category>> = MemoryCache::new(Duration::from_secs(60));
        let err = cache
            .get_or_fetch("series:9", || async { Err::<Vec<Category>, _>("503") })
            .await;
        assert_eq!(err, Err("503"));
        assert_eq!(cache.get("series:9"), None);

        let ok = cache
            .get_or_fetch("series:9", || async { Ok::<_, &str>(Vec::new()) })
            .await;
        assert_eq!(ok, Ok(Vec::new()));
    }
}
