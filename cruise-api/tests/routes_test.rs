use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use cruise_api::{app, AppState};
use cruise_core::{Cruise, CruiseSource, FetchError, ListingSettings, Ship, ShipLine};
use cruise_store::{ListingDriver, MemoryCache, UpstreamProxy};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Answers every fetch with a fixed result.
struct FixedSource(Result<Vec<Cruise>, FetchError>);

#[async_trait]
impl CruiseSource for FixedSource {
    async fn fetch_cruises(&self, _endpoint: &str) -> Result<Vec<Cruise>, FetchError> {
        self.0.clone()
    }
}

fn cruise(i: usize) -> Cruise {
    Cruise {
        price: (i * 100) as f64,
        name: format!("SAILING {}", i),
        ship: Ship {
            name: "Norwegian Prima".to_string(),
            rating: 4.3,
            reviews: 410,
            image: None,
            line: ShipLine {
                name: "Norwegian Cruise Line".to_string(),
                logo: None,
            },
        },
        itinerary: vec!["Seattle, Washington".to_string(), "Juneau, Alaska".to_string()],
        region: "Alaska".to_string(),
        departure_date: format!("2025-07-{:02}", i),
        return_date: format!("2025-07-{:02}", i + 7),
        duration: 7,
    }
}

fn test_app(result: Result<Vec<Cruise>, FetchError>, upstream_url: Option<String>) -> Router {
    let state = AppState {
        proxy: Arc::new(UpstreamProxy::new(
            reqwest::Client::new(),
            upstream_url,
            Arc::new(MemoryCache::new()),
            Duration::from_secs(60),
        )),
        driver: ListingDriver::new(Arc::new(FixedSource(result))),
        listing: ListingSettings::default(),
    };
    app(state)
}

async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get_body(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn test_listing_first_and_second_page() {
    let records: Vec<Cruise> = (1..=20).map(cruise).collect();

    let (status, json) = get_json(test_app(Ok(records.clone()), None), "/api/listing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"], "ready");
    assert_eq!(json["header"]["startIndex"], 1);
    assert_eq!(json["header"]["endIndex"], 10);
    assert_eq!(json["header"]["totalPages"], 2);
    assert_eq!(json["cards"].as_array().unwrap().len(), 10);
    assert_eq!(json["cards"][0]["name"], "Sailing 1");

    let (_, json) = get_json(test_app(Ok(records), None), "/api/listing?page=2").await;
    assert_eq!(json["header"]["startIndex"], 11);
    assert_eq!(json["header"]["endIndex"], 20);
    assert_eq!(json["cards"][9]["name"], "Sailing 20");
}

#[tokio::test]
async fn test_page_sorted_by_price_desc() {
    let records: Vec<Cruise> = (1..=12).map(cruise).collect();
    let (status, html) = get_body(test_app(Ok(records), None), "/?sort=price&dir=desc").await;

    assert_eq!(status, StatusCode::OK);
    let top = html.find("Sailing 12").expect("most expensive sailing first");
    let next = html.find("Sailing 11").expect("second most expensive");
    assert!(top < next);
    assert!(!html.contains("Sailing 1<"));
    assert!(html.contains("About 12 results (showing 1-10)"));
    assert!(html.contains("Price: High to Low"));
    assert!(html.contains(r#"href="?page=2&amp;sort=price&amp;dir=desc""#));
}

#[tokio::test]
async fn test_empty_results_page() {
    let (status, html) = get_body(test_app(Ok(Vec::new()), None), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No cruises found"));
    assert!(!html.contains(r#"class="pagination""#));
    assert!(!html.contains("About "));
}

#[tokio::test]
async fn test_network_error_page() {
    let error = FetchError::Transport("connection refused".to_string());
    let (status, html) = get_body(test_app(Err(error), None), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Error loading cruises"));
    assert!(html.contains("Network Error: connection refused"));
    assert!(!html.contains("Loading cruises..."));
    assert!(!html.contains("cruise-card"));
}

#[tokio::test]
async fn test_malformed_payload_is_error_state() {
    let error = FetchError::Malformed("missing `results` field".to_string());
    let (_, json) = get_json(test_app(Err(error), None), "/api/listing").await;

    assert_eq!(json["state"], "error");
    assert_eq!(json["error"]["kind"], "malformed");
}

#[tokio::test]
async fn test_unknown_sort_is_bad_request() {
    let (status, json) = get_json(test_app(Ok(Vec::new()), None), "/api/listing?sort=rating").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("rating"));
}

#[tokio::test]
async fn test_cruises_proxy_without_upstream() {
    let (status, json) = get_json(test_app(Ok(Vec::new()), None), "/api/cruises").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal Server Error");
}

#[tokio::test]
async fn test_cruises_proxy_forwards_upstream_body() {
    const FEED: &str = r#"{"results":[],"page":{"size":0}}"#;
    let upstream = Router::new().route("/feed", get(|| async { FEED }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.unwrap();
    });

    let app = test_app(Ok(Vec::new()), Some(format!("http://{}/feed", addr)));
    let request = Request::builder().uri("/api/cruises").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("content-type").unwrap(), "application/json");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, FEED.as_bytes());
}

#[tokio::test]
async fn test_cruises_proxy_upstream_down() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = test_app(Ok(Vec::new()), Some(format!("http://{}/feed", addr)));
    let (status, _) = get_json(app, "/api/cruises").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_health() {
    let (status, json) = get_json(test_app(Ok(Vec::new()), None), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}
