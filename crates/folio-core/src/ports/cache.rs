use async_trait::async_trait;

/// Cache trait - keyed, time-limited storage of fetched values.
#[async_trait]
pub trait Cache<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    /// Get a value; expired entries read as absent.
    async fn get(&self, key: &str) -> Option<V>;

    /// Store a value, restarting its expiration window.
    async fn set(&self, key: &str, value: V) -> Result<(), CacheError>;

    /// Swap the value of a live entry, keeping its expiration window.
    /// Returns `false` when the key is absent or expired.
    async fn replace(&self, key: &str, value: V) -> Result<bool, CacheError>;

    /// Drop a key so the next read goes to the network.
    async fn invalidate(&self, key: &str) -> Result<(), CacheError>;

    /// Drop every entry.
    async fn clear(&self);

    /// Remove expired entries, returning how many were dropped.
    async fn cleanup_expired(&self) -> usize;

    /// Entry counts, for debugging.
    async fn stats(&self) -> CacheStats;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
}

/// Cache operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
