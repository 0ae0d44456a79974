//! In-process TTL cache for raw provider responses
//!
//! Caches the raw JSON payloads so repeated runs inside one process don't
//! re-hit the rate-limited endpoints. Single writer per process; the lock is
//! only there for the async seam.

use cached::{Cached, TimedCache};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Cache key for provider requests
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// Stock symbol or query text
    pub subject: String,
    /// API endpoint or operation type
    pub endpoint: String,
    /// Additional parameters as JSON string
    pub params: String,
}

impl CacheKey {
    pub fn new(
        subject: impl Into<String>,
        endpoint: impl Into<String>,
        params: impl Serialize,
    ) -> Self {
        Self {
            subject: subject.into(),
            endpoint: endpoint.into(),
            params: serde_json::to_string(&params).unwrap_or_default(),
        }
    }
}

/// Thread-safe TTL cache for raw JSON responses
pub struct ResponseCache {
    cache: Arc<RwLock<TimedCache<CacheKey, serde_json::Value>>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<serde_json::Value> {
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    pub async fn insert(&self, key: CacheKey, value: serde_json::Value) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, value);
    }

    /// Get a cached response or fetch and cache it
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: CacheKey,
        fetcher: F,
    ) -> Result<serde_json::Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<serde_json::Value, E>>,
    {
        if let Some(value) = self.get(&key).await {
            tracing::debug!("cache hit for key: {:?}", key);
            return Ok(value);
        }

        tracing::debug!("cache miss for key: {:?}", key);

        let value = fetcher().await?;
        self.insert(key, value.clone()).await;

        Ok(value)
    }

    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Clone for ResponseCache {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

/// Cache tiers for the two data types
pub struct CacheManager {
    /// Price history responses
    pub prices: ResponseCache,
    /// News feed responses
    pub news: ResponseCache,
}

impl CacheManager {
    pub fn new(prices_ttl: Duration, news_ttl: Duration) -> Self {
        Self {
            prices: ResponseCache::new(prices_ttl),
            news: ResponseCache::new(news_ttl),
        }
    }

    /// Default tiers: 10 minutes for both, matching the upstream cache expiry
    pub fn default_config() -> Self {
        Self::new(Duration::from_secs(600), Duration::from_secs(600))
    }

    pub async fn clear_all(&self) {
        self.prices.clear().await;
        self.news.clear().await;
    }
}

impl Clone for CacheManager {
    fn clone(&self) -> Self {
        Self {
            prices: self.prices.clone(),
            news: self.news.clone(),
        }
    }
}
