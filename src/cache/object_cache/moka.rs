//! 进程内缓存后端
//!
//! 每个条目按写入时给定的 TTL 过期，TTL 为 0 时使用 `cache.default_ttl`。

use async_trait::async_trait;
use moka::{Expiry, future::Cache};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

struct EntryTtl;

impl Expiry<String, Entry> for EntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    // 覆盖写入时重新计时
    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _remaining: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

pub struct MokaCacheWrapper {
    inner: Cache<String, Entry>,
    default_ttl: Duration,
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let config = &AppConfig::get().cache;
        Ok(Self::with_capacity(config.memory.max_capacity, config.default_ttl))
    }

    pub fn with_capacity(max_capacity: u64, default_ttl_secs: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryTtl)
            .build();
        debug!(
            "Moka cache initialized (capacity {}, default ttl {}s)",
            max_capacity, default_ttl_secs
        );
        Self {
            inner,
            default_ttl: Duration::from_secs(default_ttl_secs),
        }
    }

    fn ttl_for(&self, ttl_secs: u64) -> Duration {
        if ttl_secs == 0 {
            self.default_ttl
        } else {
            Duration::from_secs(ttl_secs)
        }
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(entry) => CacheResult::Found(entry.value),
            None => CacheResult::NotFound,
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = self.ttl_for(ttl);
        self.inner.insert(key, Entry { value, ttl }).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = MokaCacheWrapper::with_capacity(100, 300);
        cache
            .insert_raw("user:abc".to_string(), "{\"id\":1}".to_string(), 60)
            .await;
        assert_eq!(
            cache.get_raw("user:abc").await,
            CacheResult::Found("{\"id\":1}".to_string())
        );

        cache.remove("user:abc").await;
        assert_eq!(cache.get_raw("user:abc").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_entries_expire_after_their_ttl() {
        let cache = MokaCacheWrapper::with_capacity(100, 300);
        cache.insert_raw("short".to_string(), "v".to_string(), 1).await;
        cache.insert_raw("default".to_string(), "v".to_string(), 0).await;

        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert_eq!(cache.get_raw("short").await, CacheResult::NotFound);
        assert_eq!(cache.get_raw("default").await, CacheResult::Found("v".to_string()));
    }

    #[test]
    fn test_zero_ttl_uses_default() {
        let cache = MokaCacheWrapper::with_capacity(10, 42);
        assert_eq!(cache.ttl_for(0), Duration::from_secs(42));
        assert_eq!(cache.ttl_for(5), Duration::from_secs(5));
    }
}
