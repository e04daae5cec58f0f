use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisResult};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

const KEY_PREFIX: &str = "dreamweave:enrichment:";

/// Redis-backed cache for enrichment responses.
///
/// Disabled when no `REDIS_URL` is configured. Holds one multiplexed,
/// auto-reconnecting connection that every call clones. Every failure is
/// logged and treated as a miss; the cache never fails a request.
#[derive(Clone)]
pub struct EnrichmentCache {
    conn: Option<ConnectionManager>,
    ttl_secs: u64,
}

impl EnrichmentCache {
    /// Opens the shared connection. A zero TTL disables the cache without connecting.
    pub async fn connect(client: redis::Client, ttl_secs: u64) -> RedisResult<Self> {
        if ttl_secs == 0 {
            return Ok(Self::disabled());
        }
        let conn = ConnectionManager::new(client).await?;
        Ok(Self {
            conn: Some(conn),
            ttl_secs,
        })
    }

    pub fn disabled() -> Self {
        Self {
            conn: None,
            ttl_secs: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.conn.is_some()
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut conn = self.conn.clone()?;
        let full_key = cache_key(key);

        let raw: Option<String> = match conn.get(&full_key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Cache read for {full_key} failed: {e}");
                return None;
            }
        };

        let value = raw.and_then(|r| serde_json::from_str(&r).ok());
        debug!(
            "Cache {} for {full_key}",
            if value.is_some() { "hit" } else { "miss" }
        );
        value
    }

    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) {
        let Some(mut conn) = self.conn.clone() else {
            return;
        };
        let full_key = cache_key(key);

        let payload = match serde_json::to_string(value) {
            Ok(p) => p,
            Err(e) => {
                warn!("Cache serialization for {full_key} failed: {e}");
                return;
            }
        };

        if let Err(e) = conn
            .set_ex::<_, _, ()>(&full_key, payload, self.ttl_secs)
            .await
        {
            warn!("Cache write for {full_key} failed: {e}");
        }
    }
}

/// Keys are case-insensitive so "Teacher" and "teacher" share an entry.
fn cache_key(key: &str) -> String {
    format!("{KEY_PREFIX}{}", key.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_normalizes() {
        assert_eq!(
            cache_key("  career-metrics:Data Scientist "),
            "dreamweave:enrichment:career-metrics:data scientist"
        );
    }

    #[tokio::test]
    async fn test_disabled_cache_always_misses() {
        let cache = EnrichmentCache::disabled();
        assert!(!cache.is_enabled());
        cache.put_json("k", &vec![1, 2, 3]).await;
        assert!(cache.get_json::<Vec<i32>>("k").await.is_none());
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_without_connecting() {
        // Nothing listens on port 1; a connection attempt would fail.
        let client = redis::Client::open("redis://127.0.0.1:1").unwrap();
        let cache = EnrichmentCache::connect(client, 0).await.unwrap();
        assert!(!cache.is_enabled());
        assert!(cache.get_json::<Vec<i32>>("k").await.is_none());
    }
}
