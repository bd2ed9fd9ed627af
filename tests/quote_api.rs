//! HTTP tests for the pricing API.
//!
//! These drive the full router with `oneshot`, so request parsing, error
//! mapping and money formatting are covered together.

use std::fs;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use frameshop_pricing::config::SharedPricingConfig;
use frameshop_pricing::pricing::PricingConfig;
use frameshop_pricing::{app, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn default_app() -> Router {
    app(AppState::new(
        SharedPricingConfig::fixed(PricingConfig::default()).unwrap(),
    ))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn example_quote() -> Value {
    json!({
        "artwork_width": 16,
        "artwork_height": 20,
        "mat_layers": [
            {"width": "2", "unit_price": {"kind": "mat", "wholesale_unit_price": "0.01"}}
        ],
        "frame_layers": [
            {"distance_from_art": 0, "unit_price": {"kind": "frame", "wholesale_unit_price": "8.00"}}
        ],
        "glass": {
            "glass_type": "regular",
            "unit_price": {"kind": "glass", "wholesale_unit_price": "0.08"}
        }
    })
}

#[tokio::test]
async fn test_health() {
    let response = default_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_quote_example_job() {
    let response = default_app()
        .oneshot(post_json("/api/pricing/quote", example_quote()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["dimensions"]["finished_width"], "20");
    assert_eq!(body["dimensions"]["united_inches"], "44");
    assert_eq!(body["frame_price"], "146.67");
    assert_eq!(body["mat_price"], "14.40");
    assert_eq!(body["glass_price"], "94.48");
    assert_eq!(body["backing_price"], "0.00");
    assert_eq!(body["labor_cost"], "34.65");
    assert_eq!(body["total_price"], "290.20");
    assert_eq!(body["quantity"], 1);
    assert_eq!(body["config_version"], "2024.1");
    assert!(body.get("wholesale_prices").is_none());
}

#[tokio::test]
async fn test_quote_with_services_and_wholesale() {
    let mut request = example_quote();
    request["quantity"] = json!(2);
    request["special_services"] = json!(["rush", "float_mount"]);
    request["include_wholesale_prices"] = json!(true);

    let response = default_app()
        .oneshot(post_json("/api/pricing/quote", request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["special_services_total"], "60.00");
    assert_eq!(body["special_services"].as_array().unwrap().len(), 2);
    assert_eq!(body["subtotal"], "350.20");
    assert_eq!(body["total_price"], "700.39");
    assert_eq!(body["wholesale_prices"]["frame"], "58.67");
    assert!(body["profitability"]["gross_profit_margin"].is_string());
}

#[tokio::test]
async fn test_fractional_quantity_is_rejected() {
    let mut request = example_quote();
    request["quantity"] = json!(1.5);

    let response = default_app()
        .oneshot(post_json("/api/pricing/quote", request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error_type"], "invalid_quantity");
    assert_eq!(body["details"]["field"], "quantity");
}

#[tokio::test]
async fn test_zero_quantity_is_rejected() {
    let mut request = example_quote();
    request["quantity"] = json!(0);

    let response = default_app()
        .oneshot(post_json("/api/pricing/quote", request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error_type"], "invalid_quantity");
}

#[tokio::test]
async fn test_negative_width_is_rejected() {
    let mut request = example_quote();
    request["artwork_width"] = json!("-1");

    let response = default_app()
        .oneshot(post_json("/api/pricing/quote", request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error_type"], "invalid_dimensions");
    assert_eq!(body["details"]["field"], "artwork_width");
}

#[tokio::test]
async fn test_oversized_artwork_is_rejected() {
    let mut request = example_quote();
    request["artwork_width"] = json!("100000000000000000");
    request["artwork_height"] = json!("100000000000000000");

    let response = default_app()
        .oneshot(post_json("/api/pricing/quote", request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error_type"], "invalid_dimensions");
    assert_eq!(body["details"]["field"], "artwork_width");
}

#[tokio::test]
async fn test_oversized_unit_price_and_quantity_are_rejected() {
    let mut request = example_quote();
    request["glass"]["unit_price"]["wholesale_unit_price"] = json!("5000000");
    let response = default_app()
        .oneshot(post_json("/api/pricing/quote", request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error_type"], "invalid_unit_price");
    assert_eq!(body["details"]["field"], "glass.unit_price");

    let mut request = example_quote();
    request["quantity"] = json!(1_000_001);
    let response = default_app()
        .oneshot(post_json("/api/pricing/quote", request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error_type"], "invalid_quantity");
}

#[tokio::test]
async fn test_unknown_service_is_rejected() {
    let mut request = example_quote();
    request["special_services"] = json!(["gold_leaf"]);

    let response = default_app()
        .oneshot(post_json("/api/pricing/quote", request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error_type"], "unknown_special_service");
    assert_eq!(body["details"]["field"], "special_services");
}

#[tokio::test]
async fn test_missing_frame_price_names_layer() {
    let mut request = example_quote();
    request["frame_layers"] = json!([{"distance_from_art": 0}]);

    let response = default_app()
        .oneshot(post_json("/api/pricing/quote", request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error_type"], "missing_unit_price");
    assert_eq!(body["details"]["field"], "frame_layers[0].unit_price");
}

#[tokio::test]
async fn test_special_services_list() {
    let response = default_app()
        .oneshot(get("/api/pricing/special-services"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let services: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(services.len(), 5);
    let rush = services.iter().find(|s| s["id"] == "rush").unwrap();
    assert_eq!(rush["fee"], "25.00");
}

#[tokio::test]
async fn test_current_config() {
    let response = default_app()
        .oneshot(get("/api/pricing/config"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let config: PricingConfig = json_body(response.into_body()).await;
    assert_eq!(config, PricingConfig::default());
}

#[tokio::test]
async fn test_reload_without_config_file() {
    let response = default_app()
        .oneshot(post_json("/api/pricing/config/reload", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error_type"], "configuration_error");
    assert_eq!(
        body["message"],
        "No pricing config file configured; reload unavailable"
    );
}

#[tokio::test]
async fn test_reload_picks_up_new_fees() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pricing.json");
    let mut config = PricingConfig::default();
    fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

    let shared = SharedPricingConfig::load(Some(path.clone())).unwrap();
    let router = app(AppState::new(shared));

    config.version = "2025.1".to_string();
    config.special_services.remove("dry_mount");
    fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

    let response = router
        .clone()
        .oneshot(post_json("/api/pricing/config/reload", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["version"], "2025.1");
    assert_eq!(body["special_services"], 4);

    let response = router
        .oneshot(post_json("/api/pricing/quote", example_quote()))
        .await
        .unwrap();
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["config_version"], "2025.1");
}

#[tokio::test]
async fn test_failed_reload_keeps_serving_old_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pricing.json");
    fs::write(
        &path,
        serde_json::to_string(&PricingConfig::default()).unwrap(),
    )
    .unwrap();

    let shared = SharedPricingConfig::load(Some(path.clone())).unwrap();
    let router = app(AppState::new(shared));

    fs::write(&path, r#"{"version": "broken"}"#).unwrap();

    let response = router
        .clone()
        .oneshot(post_json("/api/pricing/config/reload", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router
        .oneshot(post_json("/api/pricing/quote", example_quote()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["config_version"], "2024.1");
    assert_eq!(body["total_price"], "290.20");
}

#[tokio::test]
async fn test_reload_reports_invalid_config_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pricing.json");
    let mut config = PricingConfig::default();
    fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

    let shared = SharedPricingConfig::load(Some(path.clone())).unwrap();
    let router = app(AppState::new(shared));

    config.labor.reference_size = rust_decimal::Decimal::ZERO;
    fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

    let response = router
        .oneshot(post_json("/api/pricing/config/reload", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error_type"], "configuration_error");
    assert_eq!(body["details"]["field"], "labor.reference_size");
}
