use axum::http::StatusCode;
use serde_json::{json, Value};
use shelfprice::api::{self, AppState};
use shelfprice::config::Config;
use shelfprice::EngineKind;
use tower::util::ServiceExt;

fn setup_test_app(config: Config) -> axum::Router {
    api::create_router(AppState::new(config, None))
}

fn fixed_rule_config() -> Config {
    Config {
        port: 0,
        discount_engine: EngineKind::FixedRule,
        ..Config::default()
    }
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_test_app(Config::default());

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/health")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let body_str = String::from_utf8(body.to_vec()).unwrap();
    assert!(body_str.contains("ok"));
}

#[tokio::test]
async fn test_ready_endpoint_reports_configured_engine() {
    let app = setup_test_app(fixed_rule_config());

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/ready")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["engine"], "fixedRule");
    assert_eq!(json["recommender"], false);
}

#[tokio::test]
async fn test_fixed_rule_last_day_hits_cost_floor() {
    let app = setup_test_app(Config::default());

    let (status, body) = post_json(
        app,
        "/v1/discount/fixed-rule",
        json!({
            "shelfLifeType": "FSL",
            "lefoFraction": 0.2,
            "profitMargin": 20,
            "weeklyDemand": 0,
            "originalPrice": 40,
            "currentInventory": 0,
            "remainingDays": 1
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendedDiscount"], "20.00");
    assert_eq!(body["discountedPrice"], "32.00");
    assert_eq!(body["finalProfitMargin"], "0.00");
    assert_eq!(body["costFloorApplied"], true);
}

#[tokio::test]
async fn test_fixed_rule_base_tier_keeps_margin() {
    let app = setup_test_app(Config::default());

    let (status, body) = post_json(
        app,
        "/v1/discount/fixed-rule",
        json!({
            "shelfLifeType": "FSL",
            "lefoFraction": 0.0,
            "profitMargin": 50,
            "weeklyDemand": 0,
            "originalPrice": 10,
            "currentInventory": 0,
            "remainingDays": 5
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recommendedDiscount"], "10.00");
    assert_eq!(body["discountedPrice"], "9.00");
    assert_eq!(body["finalProfitMargin"], "44.44");
    assert_eq!(body["costFloorApplied"], false);
}

#[tokio::test]
async fn test_fixed_rule_missing_remaining_days_is_rejected() {
    let app = setup_test_app(Config::default());

    let (status, body) = post_json(
        app,
        "/v1/discount/fixed-rule",
        json!({
            "shelfLifeType": "FSL",
            "lefoFraction": 0.0,
            "profitMargin": 20,
            "weeklyDemand": 0,
            "originalPrice": 40,
            "currentInventory": 0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("remainingDays"));
}

#[tokio::test]
async fn test_fixed_rule_non_positive_price_is_rejected() {
    let app = setup_test_app(Config::default());

    let (status, body) = post_json(
        app,
        "/v1/discount/fixed-rule",
        json!({
            "shelfLifeType": "DSL",
            "lefoFraction": 0.0,
            "profitMargin": 20,
            "weeklyDemand": 70,
            "originalPrice": 0,
            "currentInventory": 10,
            "currentMicro": 5.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("originalPrice"));
}

#[tokio::test]
async fn test_gompertz_endpoint_fresh_product() {
    let app = setup_test_app(Config::default());

    let (status, body) = post_json(
        app,
        "/v1/discount/gompertz",
        json!({
            "temperature": 4,
            "ageDays": 3,
            "totalShelfLife": 8,
            "stockLevel": 10,
            "basePrice": 2.99
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["engine"], "gompertz");
    assert_eq!(body["classification"], "SAFE");
    assert_eq!(body["discountPercent"], "20.42");
    let count = body["microbialCount"].as_f64().unwrap();
    assert!((count - 3.21).abs() < 0.01, "count {}", count);
    assert!(body["discountedPrice"].is_string());
}

#[tokio::test]
async fn test_gompertz_endpoint_unsafe_product_fully_discounted() {
    let app = setup_test_app(Config::default());

    let (status, body) = post_json(
        app,
        "/v1/discount/gompertz",
        json!({
            "temperature": 4,
            "ageDays": 20,
            "totalShelfLife": 8,
            "stockLevel": 50
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classification"], "UNSAFE");
    assert_eq!(body["discountPercent"], "100.00");
    assert!(body.get("discountedPrice").is_none());
}

#[tokio::test]
async fn test_gompertz_endpoint_rejects_zero_shelf_life() {
    let app = setup_test_app(Config::default());

    let (status, _) = post_json(
        app,
        "/v1/discount/gompertz",
        json!({
            "temperature": 4,
            "ageDays": 1,
            "totalShelfLife": 0,
            "stockLevel": 10
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_gompertz_endpoint_rejects_extreme_temperature() {
    for temperature in [6000.0, -6000.0] {
        let app = setup_test_app(Config::default());
        let (status, body) = post_json(
            app,
            "/v1/discount/gompertz",
            json!({
                "temperature": temperature,
                "ageDays": 0,
                "totalShelfLife": 8,
                "stockLevel": 10
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("temperature"));
    }
}

#[tokio::test]
async fn test_configured_engine_dispatch() {
    let app = setup_test_app(fixed_rule_config());

    let (status, body) = post_json(
        app,
        "/v1/discount",
        json!({
            "engine": "fixedRule",
            "shelfLifeType": "DSL",
            "lefoFraction": 0.0,
            "profitMargin": 50,
            "weeklyDemand": 70,
            "originalPrice": 10,
            "currentInventory": 5,
            "currentMicro": 4.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["engine"], "fixedRule");
    assert_eq!(body["recommendedDiscount"], "0.00");
    assert_eq!(body["discountedPrice"], "10.00");
}

#[tokio::test]
async fn test_configured_engine_rejects_other_strategy() {
    let app = setup_test_app(fixed_rule_config());

    let (status, body) = post_json(
        app,
        "/v1/discount",
        json!({
            "engine": "gompertz",
            "temperature": 4,
            "ageDays": 3,
            "totalShelfLife": 8,
            "daysLeft": 5,
            "stockLevel": 10
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("gompertz"));
}
