use std::sync::Arc;
use std::time::Duration;

use cruise_core::ListingSettings;
use cruise_store::app_config::{CacheBackend, Config};
use cruise_store::{CruiseClient, ListingDriver, MemoryCache, RedisCache, ResponseCache, StoreError, UpstreamProxy};

#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<UpstreamProxy>,
    pub driver: ListingDriver,
    pub listing: ListingSettings,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_seconds))
            .build()?;

        let cache: Arc<dyn ResponseCache> = match config.cache.backend {
            CacheBackend::Memory => Arc::new(MemoryCache::new()),
            CacheBackend::Redis => {
                let url = config
                    .cache
                    .redis_url
                    .as_deref()
                    .ok_or_else(|| StoreError::Config("cache.redis_url is required for the redis backend".into()))?;
                Arc::new(RedisCache::new(url)?)
            }
        };

        if config.upstream.url.is_none() {
            tracing::warn!("No upstream URL configured; /api/cruises will fail until CRUISE_API_URL is set");
        }

        let proxy = UpstreamProxy::new(
            http.clone(),
            config.upstream.url.clone(),
            cache,
            Duration::from_secs(config.upstream.revalidate_seconds),
        );
        let client = CruiseClient::with_client(http, &config.listing_base_url());

        Ok(Self {
            proxy: Arc::new(proxy),
            driver: ListingDriver::new(Arc::new(client)),
            listing: config.listing.settings()?,
        })
    }
}
