use axum::http::StatusCode;
use serde_json::{json, Value};
use shelfprice::api::{self, AppState};
use shelfprice::config::Config;
use tower::util::ServiceExt;

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = axum::http::Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            axum::body::Body::from(v.to_string())
        }
        None => axum::body::Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn create_line(app: &axum::Router, on_hand: f64) -> String {
    let (status, body) = send(app, "POST", "/v1/inventory", Some(json!({"onHand": on_hand}))).await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_and_get_line() {
    let app = api::create_router(AppState::new(Config::default(), None));
    let id = create_line(&app, 50.0).await;

    let (status, body) = send(&app, "GET", &format!("/v1/inventory/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["onHand"], 50.0);
    assert_eq!(body["daysPassed"], 0);
}

#[tokio::test]
async fn test_end_of_day_applies_sales_and_restock() {
    let app = api::create_router(AppState::new(Config::default(), None));
    let id = create_line(&app, 50.0).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/v1/inventory/{}/end-of-day", id),
        Some(json!({"dailySales": 5, "incomingStock": 10, "microbialCount": 4.0})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["onHand"], 55.0);
    assert_eq!(body["daysPassed"], 1);
    assert_eq!(body["wasted"], 0.0);
}

#[tokio::test]
async fn test_end_of_day_unsafe_load_wastes_everything() {
    let app = api::create_router(AppState::new(Config::default(), None));
    let id = create_line(&app, 50.0).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/v1/inventory/{}/end-of-day", id),
        Some(json!({"dailySales": 5, "microbialCount": 6.2})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["onHand"], 0.0);
    assert_eq!(body["wasted"], 50.0);
    assert_eq!(body["daysPassed"], 1);
}

#[tokio::test]
async fn test_end_of_day_explicit_waste() {
    let app = api::create_router(AppState::new(Config::default(), None));
    let id = create_line(&app, 50.0).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/v1/inventory/{}/end-of-day", id),
        Some(json!({"dailySales": 5, "incomingStock": 0, "wasted": 15})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["onHand"], 30.0);
    assert_eq!(body["wasted"], 15.0);
}

#[tokio::test]
async fn test_rejected_step_leaves_line_untouched() {
    let app = api::create_router(AppState::new(Config::default(), None));
    let id = create_line(&app, 50.0).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/v1/inventory/{}/end-of-day", id),
        Some(json!({"dailySales": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "GET", &format!("/v1/inventory/{}", id), None).await;
    assert_eq!(body["onHand"], 50.0);
    assert_eq!(body["daysPassed"], 0);
}

#[tokio::test]
async fn test_negative_opening_stock_is_rejected() {
    let app = api::create_router(AppState::new(Config::default(), None));
    let (status, _) = send(&app, "POST", "/v1/inventory", Some(json!({"onHand": -3}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_line_is_not_found() {
    let app = api::create_router(AppState::new(Config::default(), None));
    let missing = uuid::Uuid::new_v4();

    let (status, body) = send(&app, "GET", &format!("/v1/inventory/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains(&missing.to_string()));

    let (status, _) = send(
        &app,
        "POST",
        &format!("/v1/inventory/{}/end-of-day", missing),
        Some(json!({"dailySales": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_line_returns_final_state() {
    let app = api::create_router(AppState::new(Config::default(), None));
    let id = create_line(&app, 50.0).await;
    send(
        &app,
        "POST",
        &format!("/v1/inventory/{}/end-of-day", id),
        Some(json!({"dailySales": 5})),
    )
    .await;

    let (status, body) = send(&app, "DELETE", &format!("/v1/inventory/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["onHand"], 45.0);
    assert_eq!(body["daysPassed"], 1);

    let (status, _) = send(&app, "GET", &format!("/v1/inventory/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &format!("/v1/inventory/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_line_cap_rejects_new_lines_until_one_closes() {
    let config = Config {
        inventory_max_lines: 2,
        ..Config::default()
    };
    let app = api::create_router(AppState::new(config, None));
    let first = create_line(&app, 10.0).await;
    create_line(&app, 20.0).await;

    let (status, body) = send(&app, "POST", "/v1/inventory", Some(json!({"onHand": 30}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("full"));

    send(&app, "DELETE", &format!("/v1/inventory/{}", first), None).await;
    create_line(&app, 30.0).await;
}
