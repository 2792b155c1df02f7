use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[serde(alias = "product_id")]
    pub product_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResponse {
    pub product_id: String,
    /// Percent, one of the trained discount actions.
    pub discount: u32,
}

/// Discount recommended by the trained Q-table for a known product.
pub async fn get_discount(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    let policy = state.policy.as_ref().ok_or_else(|| {
        AppError::Config("discount recommender is disabled: PRICING_DATASET_PATH not set".to_string())
    })?;

    let product_id = req.product_id.trim();
    let discount = policy
        .recommend(product_id)
        .ok_or_else(|| AppError::BadRequest("Invalid product ID".to_string()))?;

    tracing::debug!(product = product_id, discount, "recommendation served");

    Ok(Json(RecommendResponse {
        product_id: product_id.to_string(),
        discount,
    }))
}
