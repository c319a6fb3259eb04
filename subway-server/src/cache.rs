//! Caching layer for feed fetches.
//!
//! The MTA refreshes each feed roughly every 30 seconds, so a snapshot
//! fetched within that window is as good as a fresh one. Caching per feed
//! id keeps a station lookup from re-downloading a feed that another
//! request (or another station on the same trunk) just pulled.
//!
//! Only successful snapshots are cached; failures are retried on the next
//! request.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::feed::{FeedClient, FeedError, FeedId, FeedSnapshot};

/// Configuration for the feed cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached snapshots.
    pub ttl: Duration,

    /// Maximum number of cached snapshots.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            // The upstream refresh cadence.
            ttl: Duration::from_secs(30),
            max_capacity: FeedId::ALL.len() as u64,
        }
    }
}

/// Cache of decoded feed snapshots, keyed by feed id.
///
/// Entries are `Arc`-shared immutable snapshots, so concurrent readers
/// never see a snapshot change underneath them; expiry swaps in a whole
/// new snapshot.
pub struct FeedCache {
    snapshots: MokaCache<FeedId, Arc<FeedSnapshot>>,
}

impl FeedCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let snapshots = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { snapshots }
    }

    /// Get a cached snapshot.
    pub async fn get(&self, feed: FeedId) -> Option<Arc<FeedSnapshot>> {
        self.snapshots.get(&feed).await
    }

    /// Insert a snapshot.
    pub async fn insert(&self, feed: FeedId, snapshot: Arc<FeedSnapshot>) {
        self.snapshots.insert(feed, snapshot).await;
    }

    /// Number of cached snapshots (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.snapshots.entry_count()
    }

    /// Drop all cached snapshots.
    pub fn invalidate_all(&self) {
        self.snapshots.invalidate_all();
    }
}

/// Feed client with a freshness-window cache in front of it.
pub struct CachedFeedClient {
    client: FeedClient,
    cache: FeedCache,
}

impl CachedFeedClient {
    /// Create a new cached client.
    pub fn new(client: FeedClient, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: FeedCache::new(cache_config),
        }
    }

    /// Fetch a feed snapshot, serving from cache inside the freshness
    /// window.
    pub async fn fetch(&self, feed: FeedId) -> Result<Arc<FeedSnapshot>, FeedError> {
        if let Some(cached) = self.cache.get(feed).await {
            return Ok(cached);
        }

        let snapshot = Arc::new(self.client.fetch(feed).await?);
        self.cache.insert(feed, snapshot.clone()).await;

        Ok(snapshot)
    }

    /// Access the underlying client for operations that bypass the cache.
    pub fn client(&self) -> &FeedClient {
        &self.client
    }

    /// Number of cached snapshots.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drop all cached snapshots.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(30));
        assert_eq!(config.max_capacity, 7);
    }

    #[test]
    fn cache_creation() {
        let cache = FeedCache::new(&CacheConfig::default());
        assert_eq!(cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn get_and_insert_roundtrip() {
        let cache = FeedCache::new(&CacheConfig::default());
        assert!(cache.get(FeedId::Ace).await.is_none());

        let snapshot = Arc::new(FeedSnapshot::empty(FeedId::Ace));
        cache.insert(FeedId::Ace, snapshot.clone()).await;

        let cached = cache.get(FeedId::Ace).await.unwrap();
        assert!(Arc::ptr_eq(&cached, &snapshot));
        assert!(cache.get(FeedId::L).await.is_none());
    }

    #[tokio::test]
    async fn invalidate_all_empties_the_cache() {
        let cache = FeedCache::new(&CacheConfig::default());
        cache
            .insert(FeedId::G, Arc::new(FeedSnapshot::empty(FeedId::G)))
            .await;

        cache.invalidate_all();
        assert!(cache.get(FeedId::G).await.is_none());
    }
}
