pub mod app_config;
pub mod cache;
pub mod client;
pub mod driver;
pub mod proxy;
pub mod redis_repo;

pub use cache::{MemoryCache, ResponseCache};
pub use client::CruiseClient;
pub use driver::ListingDriver;
pub use proxy::UpstreamProxy;
pub use redis_repo::RedisCache;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Upstream URL is not configured (set CRUISE_API_URL)")]
    UpstreamNotConfigured,
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("Upstream responded with status {0}")]
    UpstreamStatus(u16),
    #[error("Upstream body is not valid JSON: {0}")]
    UpstreamBody(#[from] serde_json::Error),
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
