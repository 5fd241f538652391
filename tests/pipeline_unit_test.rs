//! End-to-end tests for the vendor pipeline and the proxy failure envelope.
//!
//! Run with: cargo test --test pipeline_unit_test

use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::FixedOffset;
use serde_json::json;

use floodwatch::error::AppError;
use floodwatch::timeseries::stats;
use floodwatch::vendor::adapter;
use floodwatch::vendor::models::VendorResponse;

fn cet() -> FixedOffset {
    FixedOffset::east_opt(3600).unwrap()
}

#[test]
fn vendor_records_flow_to_chart_points_and_stats() {
    let envelope: VendorResponse = serde_json::from_value(json!({
        "status": "ok",
        "err_msg": "",
        "err_code": 0,
        "data": [
            {"created": {"ts": "2024-01-01T10:00:00Z"}, "data": {"waterHeight": 12.3}},
            {"created": {"ts": "2024-01-01T11:00:00Z"}, "data": {"waterHeight": 15.0}}
        ]
    }))
    .unwrap();

    let points = adapter::adapt(&envelope.data, cet());

    // The proxy exposes the wall-clock digits without the vendor's bogus
    // zone suffix
    let wire = serde_json::to_value(&points).unwrap();
    assert_eq!(
        wire,
        json!([
            {"timestamp": "2024-01-01T10:00:00", "value": 12.3},
            {"timestamp": "2024-01-01T11:00:00", "value": 15.0}
        ])
    );

    let summary = stats::summarize(&points);
    assert_eq!(summary.max_value, Some(15.0));
    assert_eq!(summary.max_timestamps.len(), 1);
    assert_eq!(
        summary.max_timestamps[0].naive_local().to_string(),
        "2024-01-01 11:00:00"
    );
    assert!((summary.median_value.unwrap() - 13.65).abs() < 1e-9);
}

#[test]
fn empty_vendor_payload_is_not_an_error() {
    let envelope: VendorResponse =
        serde_json::from_value(json!({"status": "ok", "data": []})).unwrap();

    let points = adapter::adapt(&envelope.data, cet());
    assert!(points.is_empty());

    let summary = stats::summarize(&points);
    assert_eq!(summary.max_value, None);
    assert_eq!(summary.median_value, None);
    assert!(summary.max_timestamps.is_empty());
}

#[tokio::test]
async fn upstream_http_error_becomes_uniform_envelope() {
    let response = AppError::UpstreamHttp {
        status: 503,
        body: "Service Unavailable".to_string(),
    }
    .into_response();

    // Any vendor failure surfaces as a 500 from the proxy
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["status"], "error");
    assert!(!body["err_msg"].as_str().unwrap().is_empty());
    assert_eq!(body["err_code"], 503);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn vendor_envelope_error_carries_vendor_code() {
    let response = AppError::UpstreamStatus {
        status: "error".to_string(),
        message: "invalid device".to_string(),
        code: 401,
    }
    .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["status"], "error");
    assert_eq!(body["err_code"], 401);
    assert!(body["err_msg"].as_str().unwrap().contains("invalid device"));
}
