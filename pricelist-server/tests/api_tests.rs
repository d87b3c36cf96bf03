//! Integration tests for pricelist-server API endpoints
//!
//! Tests cover:
//! - GET /api/price-list grouped JSON
//! - GET /api/price-list/tables rendered, filtered HTML
//! - Upstream failures surfaced as JSON errors
//! - Static UI routes, health endpoint and 404 fallback

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use pricelist_common::VisibilityFilter;
use pricelist_server::{build_router, AppState, FetchError, PriceSource, SourceInfo};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot` method

/// Test double returning a fixed upstream result
struct StubSource {
    result: fn() -> Result<Vec<Value>, FetchError>,
}

#[async_trait]
impl PriceSource for StubSource {
    async fn fetch_records(&self) -> Result<Arc<Vec<Value>>, FetchError> {
        (self.result)().map(Arc::new)
    }

    fn describe(&self) -> SourceInfo {
        SourceInfo {
            host: Some("stub.example".to_string()),
            timeout_ms: Some(2_000),
            coalesced: false,
        }
    }
}

fn price_list() -> Result<Vec<Value>, FetchError> {
    Ok(vec![
        json!({"code": "TSEL10", "desc": "Pulsa Telkomsel 10rb", "price": 10500, "status": true}),
        json!({"code": "TSEL5", "desc": "Pulsa Telkomsel 5rb", "price": 5600, "status": true}),
        json!({"code": "TSEL5", "desc": "Pulsa Telkomsel 5rb", "price": 5450, "status": false}),
        json!({"code": "DANATES1", "desc": "dana test", "brand": "dana", "price": 0}),
        json!({"code": "BROKEN"}),
    ])
}

/// Test helper: Create app backed by a stub source
fn setup_app(result: fn() -> Result<Vec<Value>, FetchError>) -> axum::Router {
    let state = AppState::new(Arc::new(StubSource { result }), VisibilityFilter::default());
    build_router(state)
}

fn test_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body")
        .to_vec()
}

async fn extract_json(body: Body) -> Value {
    serde_json::from_slice(&body_bytes(body).await).expect("Should parse JSON")
}

// =============================================================================
// Price list JSON
// =============================================================================

#[tokio::test]
async fn test_price_list_grouped_json() {
    let app = setup_app(price_list);

    let response = app.oneshot(test_request("/api/price-list")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let telkomsel = &body["Pulsa Reguler"]["Telkomsel"];
    assert_eq!(telkomsel["TSEL10"].as_array().unwrap().len(), 1);
    assert_eq!(telkomsel["TSEL5"][0]["price"], 5450);
    assert_eq!(telkomsel["TSEL5"][1]["price"], 5600);

    // JSON output is not filtered by visibility
    assert_eq!(body["E-Money"]["Dana"]["DANATES1"][0]["code"], "DANATES1");

    let categories: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(categories.len(), 2);
}

#[tokio::test]
async fn test_price_list_empty_upstream() {
    let app = setup_app(|| Ok(Vec::new()));

    let response = app.oneshot(test_request("/api/price-list")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await, json!({}));
}

// =============================================================================
// Upstream failures
// =============================================================================

#[tokio::test]
async fn test_upstream_unavailable_is_500() {
    let app = setup_app(|| Err(FetchError::Unavailable("connection refused".to_string())));

    let response = app.oneshot(test_request("/api/price-list")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert_eq!(
        body["error"],
        "No response received from API (timeout or network issue)"
    );
}

#[tokio::test]
async fn test_malformed_payload_is_500_with_details() {
    let app = setup_app(|| Err(FetchError::MalformedPayload("data field missing".to_string())));

    let response = app.oneshot(test_request("/api/price-list")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Unable to retrieve data from API");
    assert_eq!(body["details"], "Invalid data structure received");
}

#[tokio::test]
async fn test_tables_failure_is_json_error() {
    let app = setup_app(|| Err(FetchError::Reported("Signature invalid".to_string())));

    let response = app.oneshot(test_request("/api/price-list/tables")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(extract_json(response.into_body()).await, json!({"error": "Signature invalid"}));
}

// =============================================================================
// Rendered tables
// =============================================================================

#[tokio::test]
async fn test_tables_hide_test_codes() {
    let app = setup_app(price_list);

    let response = app.oneshot(test_request("/api/price-list/tables")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let html = String::from_utf8(body_bytes(response.into_body()).await).unwrap();
    assert!(html.contains("Telkomsel Pulsa Reguler - Kode TSEL"));
    assert!(html.contains("Rp 5.450"));
    assert!(html.contains("Gangguan"));
    assert!(!html.contains("DANATES1"));
}

// =============================================================================
// Static UI, health and fallback
// =============================================================================

#[tokio::test]
async fn test_index_served() {
    let app = setup_app(price_list);

    let response = app.oneshot(test_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response.into_body()).await).unwrap();
    assert!(html.contains("/static/app.js"));
}

#[tokio::test]
async fn test_app_js_served() {
    let app = setup_app(price_list);

    let response = app.oneshot(test_request("/static/app.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/javascript"
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(|| Err(FetchError::Unavailable("down".to_string())));

    let response = app.oneshot(test_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Reported without contacting the failing upstream
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "pricelist-server");
    assert!(body["version"].is_string());
    assert_eq!(
        body["upstream"],
        json!({"host": "stub.example", "timeout_ms": 2000, "coalesced": false})
    );
    assert_eq!(body["hidden_prefixes"], json!(["OMCEK", "DANATES", "OVOTES", "TES"]));
}

#[tokio::test]
async fn test_unknown_route_is_404_json() {
    let app = setup_app(price_list);

    let response = app.oneshot(test_request("/api/unknown")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(extract_json(response.into_body()).await, json!({"error": "Not Found"}));
}
