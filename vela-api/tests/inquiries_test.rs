//! In-process tests for the customer-text endpoint.
//!
//! The router is driven via `tower::ServiceExt::oneshot` with stub upstream
//! gateways. No sockets, no network I/O; the stubs count their calls so the
//! short-circuit paths can prove nothing upstream was touched.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use vela_api::{app, AppState};
use vela_core::extract::{ExtractedInfo, OrderIdExtractor};
use vela_core::gateway::{OrderDirectory, ReplyComposer};
use vela_core::lookup::LookupResult;
use vela_shared::models::ShopifyOrder;

// ---------------------------------------------------------------------------
// Stub gateways
// ---------------------------------------------------------------------------

struct StubDirectory {
    result: LookupResult,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl OrderDirectory for StubDirectory {
    async fn find_order(&self, _info: Option<&ExtractedInfo>) -> LookupResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

struct StubComposer {
    reply: Option<String>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ReplyComposer for StubComposer {
    async fn compose(&self, _question: &str, _details: &Value, _id: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Harness {
    state: AppState,
    lookup_calls: Arc<AtomicUsize>,
    compose_calls: Arc<AtomicUsize>,
}

fn make_harness(lookup: LookupResult, reply: Option<&str>) -> Harness {
    let lookup_calls = Arc::new(AtomicUsize::new(0));
    let compose_calls = Arc::new(AtomicUsize::new(0));

    let state = AppState {
        extractor: Arc::new(OrderIdExtractor::new()),
        orders: Arc::new(StubDirectory {
            result: lookup,
            calls: Arc::clone(&lookup_calls),
        }),
        composer: Arc::new(StubComposer {
            reply: reply.map(String::from),
            calls: Arc::clone(&compose_calls),
        }),
    };

    Harness {
        state,
        lookup_calls,
        compose_calls,
    }
}

fn sample_order() -> ShopifyOrder {
    serde_json::from_value(serde_json::json!({
        "id": 450789469,
        "order_number": 1001,
        "name": "#1001",
        "created_at": "2024-01-15T10:00:00-05:00",
        "total_price": "199.65",
        "fulfillment_status": "fulfilled",
        "email": "bob.norman@example.com",
        "customer": { "first_name": "Bob", "last_name": "Norman" },
        "shipping_address": { "city": "Louisville", "country": "United States" }
    }))
    .expect("sample order is valid")
}

/// Drive the router with one POST to the endpoint, return (status, body).
async fn post_text(state: AppState, body: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/process-customer-text")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap();

    let resp = app(state).oneshot(req).await.expect("oneshot failed");
    let status = resp.status();
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("body collect failed")
        .to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_text_returns_400() {
    let harness = make_harness(LookupResult::found(sample_order()), Some("hi"));
    let (status, json) = post_text(harness.state, "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "No text provided");
    assert_eq!(harness.lookup_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn empty_text_returns_400() {
    let harness = make_harness(LookupResult::found(sample_order()), Some("hi"));
    let (status, json) = post_text(harness.state, r#"{"text": ""}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

// ---------------------------------------------------------------------------
// Extraction miss short-circuits before any upstream call
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_digits_asks_for_order_number_without_upstream_calls() {
    let harness = make_harness(LookupResult::found(sample_order()), Some("hi"));
    let (status, json) = post_text(harness.state, r#"{"text": "where is my stuff?"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["extractedInfo"], serde_json::json!({}));
    assert_eq!(json["orderFound"], false);
    assert!(json["orderDetails"].is_null());
    assert!(json["naturalResponse"]
        .as_str()
        .unwrap()
        .contains("order number"));
    assert_eq!(json["error"]["message"], "No order number found in text");

    assert_eq!(harness.lookup_calls.load(Ordering::SeqCst), 0);
    assert_eq!(harness.compose_calls.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

#[tokio::test]
async fn found_order_flows_through_to_reply() {
    let harness = make_harness(
        LookupResult::found(sample_order()),
        Some("Hi Bob, order #1001 shipped."),
    );
    let (status, json) = post_text(harness.state, r#"{"text": "Where is order #1001?"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["extractedInfo"]["orderId"], "1001");
    assert_eq!(json["orderFound"], true);
    assert_eq!(json["orderDetails"]["orderNumber"], 1001);
    assert_eq!(json["orderDetails"]["totalPrice"], "199.65");
    assert_eq!(json["orderDetails"]["customer"]["name"], "Bob Norman");
    assert_eq!(json["naturalResponse"], "Hi Bob, order #1001 shipped.");
    assert!(json["error"].is_null());

    assert_eq!(harness.lookup_calls.load(Ordering::SeqCst), 1);
    assert_eq!(harness.compose_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn lookup_miss_still_returns_200_and_composes() {
    let criteria = ExtractedInfo {
        order_id: "42".to_string(),
    };
    let harness = make_harness(
        LookupResult::not_found(criteria),
        Some("I couldn't locate order #42."),
    );
    let (status, json) = post_text(harness.state, r#"{"text": "order #42 please"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["orderFound"], false);
    assert!(json["orderDetails"].is_null());
    assert!(json["error"]["message"].as_str().unwrap().contains("not found"));
    assert_eq!(json["error"]["searchCriteria"]["orderId"], "42");
    assert_eq!(json["naturalResponse"], "I couldn't locate order #42.");

    // The composer runs even though the lookup failed.
    assert_eq!(harness.compose_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn upstream_failure_is_surfaced_as_error_data() {
    let criteria = ExtractedInfo {
        order_id: "7".to_string(),
    };
    let harness = make_harness(
        LookupResult::failed(
            "Shopify API error: 502 Bad Gateway\n{\"errors\":\"upstream\"}".to_string(),
            criteria,
        ),
        Some("Something went wrong looking that up."),
    );
    let (status, json) = post_text(harness.state, r#"{"text": "check order 7 now"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["orderFound"], false);
    assert!(json["error"]["message"].as_str().unwrap().contains("502"));
    assert_eq!(harness.compose_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn composer_failure_yields_null_reply() {
    let harness = make_harness(LookupResult::found(sample_order()), None);
    let (status, json) = post_text(harness.state, r#"{"text": "Where is order #1001?"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["orderFound"], true);
    assert!(json["naturalResponse"].is_null());
}

#[tokio::test]
async fn standalone_number_is_extracted_and_looked_up() {
    let harness = make_harness(LookupResult::found(sample_order()), Some("done"));
    let (_, json) = post_text(harness.state, r#"{"text": "I ordered 3 of item 1001"}"#).await;

    // Last standalone digit run wins when no # anchor exists.
    assert_eq!(json["extractedInfo"]["orderId"], "1001");
    assert_eq!(harness.lookup_calls.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------------
// Ambient routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_returns_200() {
    let harness = make_harness(LookupResult::found(sample_order()), None);
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(axum::body::Body::empty())
        .unwrap();

    let resp = app(harness.state).oneshot(req).await.expect("oneshot failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("body collect failed")
        .to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["ok"], true);
    assert_eq!(json["service"], "vela-api");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let harness = make_harness(LookupResult::found(sample_order()), None);
    let req = Request::builder()
        .method("GET")
        .uri("/api/does-not-exist")
        .body(axum::body::Body::empty())
        .unwrap();

    let resp = app(harness.state).oneshot(req).await.expect("oneshot failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
