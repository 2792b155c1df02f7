use axum::extract::State;
use axum::Json;

use crate::api::AppState;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ready",
        "engine": state.engine.kind(),
        "recommender": state.policy.is_some(),
        "recommenderProducts": state.policy.as_ref().map_or(0, |p| p.product_count()),
        "inventoryLines": state.inventory.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_health_returns_ok() {
        let Json(body) = health().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_ready_reports_engine() {
        let state = AppState::new(Config::default(), None);
        let Json(body) = ready(State(state)).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["engine"], "gompertz");
        assert_eq!(body["recommender"], false);
        assert_eq!(body["recommenderProducts"], 0);
        assert_eq!(body["inventoryLines"], 0);
    }
}
