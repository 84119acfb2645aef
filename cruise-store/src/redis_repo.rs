use async_trait::async_trait;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::info;

use crate::cache::ResponseCache;
use crate::StoreResult;

/// Shared cache backend so every API instance serves the same upstream snapshot.
#[derive(Clone)]
pub struct RedisCache {
    client: redis::Client,
}

impl RedisCache {
    pub fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        info!("Redis response cache configured");
        Ok(Self { client })
    }

    fn key(key: &str) -> String {
        format!("cruises:upstream:{}", key)
    }
}

#[async_trait]
impl ResponseCache for RedisCache {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let body: Option<Vec<u8>> = conn.get(Self::key(key)).await?;
        Ok(body)
    }

    async fn put(&self, key: &str, body: &[u8], ttl: Duration) -> StoreResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        // SET EX needs at least one second
        let ttl_seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(Self::key(key), body, ttl_seconds).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_namespace() {
        assert_eq!(RedisCache::key("https://api.example.com/cruises"), "cruises:upstream:https://api.example.com/cruises");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(RedisCache::new("not a redis url").is_err());
    }
}
