use cruise_core::pagination::{PageSize, DEFAULT_PAGE_SIZE};
use cruise_core::listing::{ListingSettings, DEFAULT_ENDPOINT};
use cruise_core::SortOrder;
use serde::Deserialize;
use std::env;

use crate::StoreError;

/// Environment variable naming the upstream cruise data source.
pub const UPSTREAM_URL_VAR: &str = "CRUISE_API_URL";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

fn default_port() -> u16 { 3000 }

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub url: Option<String>,
    #[serde(default = "default_revalidate")]
    pub revalidate_seconds: u64,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: None,
            revalidate_seconds: default_revalidate(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_revalidate() -> u64 { 60 }
fn default_timeout() -> u64 { 10 }

#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Base for relative endpoints. Defaults to this server's own address.
    pub base_url: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_normalize")]
    pub normalize: bool,
    #[serde(default)]
    pub initial_sort: SortOrder,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            base_url: None,
            page_size: default_page_size(),
            normalize: default_normalize(),
            initial_sort: SortOrder::default(),
        }
    }
}

fn default_endpoint() -> String { DEFAULT_ENDPOINT.to_string() }
fn default_page_size() -> usize { DEFAULT_PAGE_SIZE }
fn default_normalize() -> bool { true }

impl ListingConfig {
    pub fn settings(&self) -> Result<ListingSettings, StoreError> {
        let page_size = PageSize::new(self.page_size).map_err(|e| StoreError::Config(e.to_string()))?;
        Ok(ListingSettings {
            endpoint: self.endpoint.clone(),
            page_size,
            normalize: self.normalize,
            initial_sort: self.initial_sort,
        })
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    Redis,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,
    pub redis_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `CRUISE__SERVER__PORT=8080` sets `server.port`
            .add_source(config::Environment::with_prefix("CRUISE").prefix_separator("__").separator("__").try_parsing(true))
            .set_override_option("upstream.url", env::var(UPSTREAM_URL_VAR).ok())?
            .build()?;

        s.try_deserialize()
    }

    /// Base URL that relative listing endpoints resolve against.
    pub fn listing_base_url(&self) -> String {
        self.listing
            .base_url
            .clone()
            .unwrap_or_else(|| format!("http://127.0.0.1:{}", self.server.port))
    }
}
