use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::cache::ResponseCache;
use crate::{StoreError, StoreResult};

/// Forwards the upstream cruise feed, serving repeat requests from cache for
/// the revalidation window.
pub struct UpstreamProxy {
    http: reqwest::Client,
    url: Option<String>,
    cache: Arc<dyn ResponseCache>,
    revalidate: Duration,
}

impl UpstreamProxy {
    pub fn new(http: reqwest::Client, url: Option<String>, cache: Arc<dyn ResponseCache>, revalidate: Duration) -> Self {
        Self { http, url, cache, revalidate }
    }

    /// Returns the upstream JSON body exactly as received. Cache failures are
    /// logged and bypassed.
    pub async fn fetch(&self) -> StoreResult<Vec<u8>> {
        let url = self.url.as_deref().ok_or(StoreError::UpstreamNotConfigured)?;

        match self.cache.get(url).await {
            Ok(Some(body)) => {
                debug!("Serving cruises from cache");
                return Ok(body);
            }
            Ok(None) => {}
            Err(e) => warn!("Response cache read failed, bypassing: {}", e),
        }

        let body = self.fetch_upstream(url).await?;

        if let Err(e) = self.cache.put(url, &body, self.revalidate).await {
            warn!("Response cache write failed: {}", e);
        }

        Ok(body)
    }

    async fn fetch_upstream(&self, url: &str) -> StoreResult<Vec<u8>> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::UpstreamStatus(status.as_u16()));
        }

        let body = response.bytes().await?.to_vec();
        // Only cache and forward bodies that are JSON
        serde_json::from_slice::<serde::de::IgnoredAny>(&body)?;

        info!("Refreshed cruise feed from upstream ({} bytes)", body.len());
        Ok(body)
    }
}
