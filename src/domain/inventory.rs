//! Day-stepped inventory state.

use serde::{Deserialize, Serialize};

/// Stock of a single inventory line and its simulation clock.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryState {
    pub on_hand: f64,
    pub days_passed: u32,
}

impl InventoryState {
    pub fn new(on_hand: f64) -> Self {
        Self {
            on_hand,
            days_passed: 0,
        }
    }
}

/// Everything that happens to a line between two end-of-day steps.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEvents {
    pub daily_sales: f64,
    pub incoming_stock: f64,
    pub wasted: f64,
}

impl DayEvents {
    pub fn new(daily_sales: f64, incoming_stock: f64, wasted: f64) -> Self {
        Self {
            daily_sales,
            incoming_stock,
            wasted,
        }
    }
}
