//! In-memory TTL cache for fetched blogs and comment lists.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use folio_core::ports::{Cache, CacheError, CacheStats};

/// Cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Age after which an entry reads as absent.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15 * 60),
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            ttl: crate::env::secs_or("FOLIO_CACHE_TTL_SECS", 15 * 60),
        }
    }
}

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// In-memory cache using a HashMap behind an async RwLock.
///
/// Expired entries are dropped lazily on read and in bulk by
/// [`Cache::cleanup_expired`]. There is no size bound.
pub struct InMemoryCache<V> {
    store: RwLock<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
}

impl<V> InMemoryCache<V> {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            ttl: config.ttl,
        }
    }

    fn is_expired(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        now.duration_since(entry.stored_at) > self.ttl
    }
}

impl<V> Default for InMemoryCache<V> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[async_trait]
impl<V> Cache<V> for InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<V> {
        let store = self.store.read().await;
        let entry = store.get(key)?;

        if self.is_expired(entry, Instant::now()) {
            drop(store);
            let mut store = self.store.write().await;
            store.remove(key);
            tracing::debug!(key = %key, "Cache entry expired");
            return None;
        }

        Some(entry.value.clone())
    }

    async fn set(&self, key: &str, value: V) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
        Ok(())
    }

    async fn replace(&self, key: &str, value: V) -> Result<bool, CacheError> {
        let now = Instant::now();
        let mut store = self.store.write().await;
        match store.get_mut(key) {
            Some(entry) if !self.is_expired(entry, now) => {
                entry.value = value;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        let mut store = self.store.write().await;
        store.remove(key);
        Ok(())
    }

    async fn clear(&self) {
        self.store.write().await.clear();
    }

    async fn cleanup_expired(&self) -> usize {
        let now = Instant::now();
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|_, entry| !self.is_expired(entry, now));
        before - store.len()
    }

    async fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let store = self.store.read().await;
        let expired_entries = store
            .values()
            .filter(|entry| self.is_expired(entry, now))
            .count();

        CacheStats {
            total_entries: store.len(),
            valid_entries: store.len() - expired_entries,
            expired_entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> InMemoryCache<String> {
        InMemoryCache::default()
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = cache();
        cache.set("key1", "value1".to_string()).await.unwrap();
        assert_eq!(cache.get("key1").await, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_invalidate() {
        let cache = cache();
        cache.set("key1", "value1".to_string()).await.unwrap();
        cache.invalidate("key1").await.unwrap();
        assert_eq!(cache.get("key1").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = cache();
        cache.set("post", "cached".to_string()).await.unwrap();

        tokio::time::advance(Duration::from_secs(15 * 60)).await;
        assert_eq!(cache.get("post").await, Some("cached".to_string()));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(cache.get("post").await, None);
        assert_eq!(cache.stats().await.total_entries, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_keeps_expiration_window() {
        let cache = InMemoryCache::new(CacheConfig {
            ttl: Duration::from_secs(60),
        });
        cache.set("post", 1u32).await.unwrap();

        tokio::time::advance(Duration::from_secs(40)).await;
        assert!(cache.replace("post", 2).await.unwrap());
        assert_eq!(cache.get("post").await, Some(2));

        tokio::time::advance(Duration::from_secs(21)).await;
        assert_eq!(cache.get("post").await, None);
        assert!(!cache.replace("post", 3).await.unwrap());
        assert_eq!(cache.get("post").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_and_stats() {
        let cache = InMemoryCache::new(CacheConfig {
            ttl: Duration::from_secs(60),
        });
        cache.set("old", 1u32).await.unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;
        cache.set("fresh", 2u32).await.unwrap();

        assert_eq!(
            cache.stats().await,
            CacheStats {
                total_entries: 2,
                valid_entries: 1,
                expired_entries: 1,
            }
        );
        assert_eq!(cache.cleanup_expired().await, 1);
        assert_eq!(cache.get("fresh").await, Some(2));

        cache.clear().await;
        assert_eq!(cache.stats().await.total_entries, 0);
    }
}
