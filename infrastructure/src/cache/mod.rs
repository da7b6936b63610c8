//! Response caches implementing [`CachePort`]
//!
//! - [`InMemoryCache`]: process-local map with expiry
//! - [`RedisCache`]: shared cache on a Redis server
//!
//! Collaborators store typed values through [`get_json`] / [`set_json`],
//! which treat every cache failure as a miss.

mod memory;
mod redis_cache;

pub use memory::InMemoryCache;
pub use redis_cache::RedisCache;

use monitor_application::CachePort;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Look up `key` and decode it. Errors and undecodable entries are misses.
pub async fn get_json<T: DeserializeOwned>(cache: &dyn CachePort, key: &str) -> Option<T> {
    let raw = match cache.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "Cache miss");
            return None;
        }
        Err(e) => {
            warn!(key, error = %e, "Cache read failed");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => {
            debug!(key, "Cache hit");
            Some(value)
        }
        Err(e) => {
            warn!(key, error = %e, "Discarding undecodable cache entry");
            None
        }
    }
}

/// Encode and store `value`. Failures are logged and ignored.
pub async fn set_json<T: Serialize + ?Sized>(
    cache: &dyn CachePort,
    key: &str,
    value: &T,
    ttl: Duration,
) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(key, error = %e, "Skipping cache write, value not serializable");
            return;
        }
    };
    if let Err(e) = cache.set(key, &raw, ttl).await {
        warn!(key, error = %e, "Cache write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor_application::NoCache;

    #[tokio::test]
    async fn test_json_helpers_round_trip_through_memory() {
        let cache = InMemoryCache::new();
        set_json(&cache, "repos", &vec!["api", "web"], Duration::from_secs(60)).await;

        let repos: Option<Vec<String>> = get_json(&cache, "repos").await;
        assert_eq!(repos, Some(vec!["api".to_string(), "web".to_string()]));
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss() {
        let cache = InMemoryCache::new();
        cache
            .set("repos", "not json", Duration::from_secs(60))
            .await
            .unwrap();

        let repos: Option<Vec<String>> = get_json(&cache, "repos").await;
        assert!(repos.is_none());
    }

    #[tokio::test]
    async fn test_no_cache_always_misses() {
        set_json(&NoCache, "k", &1u32, Duration::from_secs(60)).await;
        let value: Option<u32> = get_json(&NoCache, "k").await;
        assert!(value.is_none());
    }
}
