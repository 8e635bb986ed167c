//! End-to-end smoke tests for the full fieldlinkd stack.
//!
//! Each test spins up the complete application (in-memory stores, real
//! services, real axum routers) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot` — no TCP port is bound.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use fieldlink_adapter_http_axum::router;
use fieldlink_adapter_http_axum::state::{HarnessState, PairingState};
use fieldlink_adapter_storage_memory::{InMemoryDeviceRepository, InMemoryRequestLog};
use fieldlink_app::services::pairing_service::PairingService;
use fieldlink_app::services::request_log_service::RequestLogService;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Build a fully-wired pairing router.
fn pairing_app() -> axum::Router {
    let state = PairingState::new(PairingService::new(InMemoryDeviceRepository::new()));
    router::pairing(state, router::PAIRING_BODY_LIMIT)
}

/// Build a fully-wired harness router.
fn harness_app() -> axum::Router {
    let log = InMemoryRequestLog::with_capacity(50);
    router::harness(HarnessState::new(RequestLogService::new(log), 5))
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(resp: axum::response::Response) -> Value {
    serde_json::from_slice(&resp.into_body().collect().await.unwrap().to_bytes()).unwrap()
}

// ---------------------------------------------------------------------------
// Pairing service: ESP32 lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_complete_device_pairing_cycle() {
    let app = pairing_app();

    // First contact
    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/register",
            &json!({"deviceId": "ESP32-AB12", "deviceType": "ESP32", "version": "1.0.3"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = read_json(resp).await;
    assert_eq!(body["message"], "Registration successful. Device paired.");
    let shop_id = body["shopId"].as_str().unwrap().to_string();

    // Reboot: check in again
    let resp = app
        .clone()
        .oneshot(post_json("/api/register", &json!({"deviceId": "ESP32-AB12"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_json(resp).await;
    assert_eq!(body["message"], "Device already registered and paired.");
    assert_eq!(body["shopId"], shop_id.as_str());

    // Two readings and an alert
    for smoke in [10, 85] {
        let resp = app
            .clone()
            .oneshot(post_json(
                "/api/data",
                &json!({
                    "deviceId": "ESP32-AB12",
                    "shopId": shop_id,
                    "type": "sensor_data",
                    "data": {"smoke": smoke, "temperature": 23.1}
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/data",
            &json!({
                "deviceId": "ESP32-AB12",
                "shopId": shop_id,
                "type": "alert",
                "alertType": "SMOKE",
                "message": "Smoke level critical"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await["status"], "Data received");

    // Unknown type is accepted
    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/data",
            &json!({"deviceId": "ESP32-AB12", "shopId": shop_id, "type": "heartbeat"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Only the two readings were stored
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/devices/ESP32-AB12")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let device = read_json(resp).await;
    assert_eq!(device["shopId"], shop_id.as_str());
    assert_eq!(device["deviceType"], "ESP32");
    let samples = device["samples"].as_array().unwrap();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0]["smoke"], 10);
    assert_eq!(samples[1]["smoke"], 85);
}

#[tokio::test]
async fn should_reject_data_from_unpaired_device() {
    let resp = pairing_app()
        .oneshot(post_json(
            "/api/data",
            &json!({"deviceId": "never-seen", "shopId": "SHOP-1", "type": "sensor_data"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(read_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn should_return_not_found_for_unknown_device_lookup() {
    let resp = pairing_app()
        .oneshot(
            Request::builder()
                .uri("/api/devices/ghost")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_reject_malformed_json_on_register() {
    let resp = pairing_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/register")
                .header("content-type", "application/json")
                .body(Body::from("{\"deviceId\": "))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Harness: SIM900 connectivity checks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_record_sim900_session_newest_first() {
    let app = harness_app();

    let resp = app
        .clone()
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/data")
                .header("content-type", "text/plain")
                .body(Body::from("smoke=3;temp=19"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await["received"], "smoke=3;temp=19");

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/requests")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let log = read_json(resp).await;
    let log = log.as_array().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0]["method"], "POST");
    assert_eq!(log[0]["path"], "/data");
    assert_eq!(log[1]["path"], "/test");
}

#[tokio::test]
async fn should_render_dashboard_with_recorded_request() {
    let app = harness_app();
    app.clone()
        .oneshot(post_json("/data", &json!({"foo": "bar"})))
        .await
        .unwrap();

    let resp = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(
        resp.into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec(),
    )
    .unwrap();
    assert!(html.contains("Recent requests"));
    assert!(html.contains("data</code>"));
    assert!(html.contains("bar"));
}
