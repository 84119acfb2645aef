use async_trait::async_trait;
use cruise_core::models::decode_results;
use cruise_core::{Cruise, CruiseSource, FetchError};
use std::time::Duration;
use tracing::{info, warn};

/// HTTP fetch client for the cruise list endpoint.
#[derive(Clone)]
pub struct CruiseClient {
    http: reqwest::Client,
    base_url: String,
}

impl CruiseClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URLs pass through; relative endpoints hang off the base URL.
    pub fn resolve(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }
}

#[async_trait]
impl CruiseSource for CruiseClient {
    async fn fetch_cruises(&self, endpoint: &str) -> Result<Vec<Cruise>, FetchError> {
        let url = self.resolve(endpoint);

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!("Cruise fetch from {} failed: {}", url, e);
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Cruise fetch from {} returned {}", url, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let cruises = decode_results(&body)?;
        info!("Fetched {} cruises from {}", cruises.len(), url);
        Ok(cruises)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base_url: &str) -> CruiseClient {
        CruiseClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_resolve() {
        let client = client("http://127.0.0.1:3000/");
        assert_eq!(client.resolve("/api/cruises"), "http://127.0.0.1:3000/api/cruises");
        assert_eq!(client.resolve("api/cruises"), "http://127.0.0.1:3000/api/cruises");
        assert_eq!(client.resolve("https://cruises.example.com/v1"), "https://cruises.example.com/v1");
    }

    #[tokio::test]
    async fn test_fetch_decodes_results() {
        let body = r#"{"results":[{"price":499,"name":"BAHAMAS","ship":{"name":"Utopia","rating":4.2,"reviews":88,"image":null,"line":{"name":"Royal Caribbean","logo":null}},"itinerary":["Nassau, Bahamas"],"region":"Bahamas","departureDate":"2025-05-01","returnDate":"2025-05-04","duration":3}]}"#;
        let base = serve(Router::new().route("/api/cruises", get(move || async move { body }))).await;

        let cruises = client(&base).fetch_cruises("/api/cruises").await.unwrap();
        assert_eq!(cruises.len(), 1);
        assert_eq!(cruises[0].name, "BAHAMAS");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let base = serve(Router::new().route("/api/cruises", get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }))).await;

        let err = client(&base).fetch_cruises("/api/cruises").await.unwrap_err();
        assert_eq!(err, FetchError::Status(503));
        assert_eq!(err.to_string(), "Request failed with status code 503");
    }

    #[tokio::test]
    async fn test_malformed_payload_is_an_error() {
        let base = serve(Router::new().route("/api/cruises", get(|| async { r#"{"results": "none"}"# }))).await;

        let err = client(&base).fetch_cruises("/api/cruises").await.unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr)).fetch_cruises("/api/cruises").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
