use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::StoreResult;

/// Short-lived store for raw upstream response bodies.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Stores `body` for `ttl`, replacing any previous entry.
    async fn put(&self, key: &str, body: &[u8], ttl: Duration) -> StoreResult<()>;
}

struct CacheEntry {
    body: Vec<u8>,
    expires_at: Instant,
}

/// Process-local cache; entries vanish once their ttl has elapsed and are
/// swept on the next write.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.body.clone()))
    }

    async fn put(&self, key: &str, body: &[u8], ttl: Duration) -> StoreResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            CacheEntry {
                body: body.to_vec(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }
}
