pub mod discount;
pub mod health;
pub mod inventory;
pub mod nfc;
pub mod recommend;

use crate::config::Config;
use crate::engine::{self, DiscountEngine, DiscountPolicy, FixedRuleDiscountEngine, GompertzSpoilageEngine};
use crate::store::InventoryRegistry;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Strategy selected by `DISCOUNT_ENGINE`.
    pub engine: Arc<dyn DiscountEngine>,
    pub fixed_rule: Arc<FixedRuleDiscountEngine>,
    pub gompertz: Arc<GompertzSpoilageEngine>,
    pub inventory: Arc<InventoryRegistry>,
    /// Absent when no dataset is configured.
    pub policy: Option<Arc<DiscountPolicy>>,
}

impl AppState {
    pub fn new(config: Config, policy: Option<DiscountPolicy>) -> Self {
        let engine: Arc<dyn DiscountEngine> = Arc::from(engine::build(config.discount_engine));
        let inventory = Arc::new(InventoryRegistry::new(config.inventory_max_lines));
        Self {
            config,
            engine,
            fixed_rule: Arc::new(FixedRuleDiscountEngine::default()),
            gompertz: Arc::new(GompertzSpoilageEngine::default()),
            inventory,
            policy: policy.map(Arc::new),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/discount", post(discount::post_discount))
        .route("/v1/discount/fixed-rule", post(discount::post_fixed_rule))
        .route("/v1/discount/gompertz", post(discount::post_gompertz))
        .route("/v1/nfc/quote", post(nfc::post_nfc_quote))
        .route("/v1/inventory", post(inventory::create_line))
        .route(
            "/v1/inventory/:id",
            get(inventory::get_line).delete(inventory::delete_line),
        )
        .route("/v1/inventory/:id/end-of-day", post(inventory::end_of_day))
        .route("/v1/get_discount", post(recommend::get_discount))
        .layer(cors)
        .with_state(state)
}
