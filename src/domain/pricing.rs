//! Fixed-rule pricing input and output records.

use serde::{Deserialize, Serialize};

use super::primitives::ShelfLifeType;

/// Product attributes consumed by the fixed-rule engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPricingInput {
    pub shelf_life_type: ShelfLifeType,
    /// Least-expiry-first-out rotation fraction in [0, 1].
    pub lefo_fraction: f64,
    /// Percent in [0, 100].
    pub profit_margin: f64,
    pub weekly_demand: f64,
    pub original_price: f64,
    pub current_inventory: f64,
    /// Days until expiry; required for FSL, may be zero or negative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_shelf_life: Option<i64>,
    /// log10 cfu/g; required for DSL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_micro: Option<f64>,
}

impl ProductPricingInput {
    /// FSL input with the optional DSL field unset.
    pub fn fsl(
        original_price: f64,
        profit_margin: f64,
        remaining_days: i64,
        lefo_fraction: f64,
    ) -> Self {
        Self {
            shelf_life_type: ShelfLifeType::Fsl,
            lefo_fraction,
            profit_margin,
            weekly_demand: 0.0,
            original_price,
            current_inventory: 0.0,
            remaining_days: Some(remaining_days),
            total_shelf_life: None,
            current_micro: None,
        }
    }

    /// DSL input with the optional FSL fields unset.
    pub fn dsl(
        original_price: f64,
        profit_margin: f64,
        current_micro: f64,
        current_inventory: f64,
        weekly_demand: f64,
    ) -> Self {
        Self {
            shelf_life_type: ShelfLifeType::Dsl,
            lefo_fraction: 0.0,
            profit_margin,
            weekly_demand,
            original_price,
            current_inventory,
            remaining_days: None,
            total_shelf_life: None,
            current_micro: Some(current_micro),
        }
    }

    /// Price at which the margin is exactly zero.
    pub fn cost_price(&self) -> f64 {
        self.original_price * (1.0 - self.profit_margin / 100.0)
    }
}

/// Result of a fixed-rule quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPricingOutput {
    /// Percent; at most the ceiling unless the cost floor overrode it.
    pub recommended_discount: f64,
    pub discounted_price: f64,
    /// Percent, recomputed from the discounted price.
    pub final_profit_margin: f64,
    pub cost_price: f64,
    pub cost_floor_applied: bool,
}
