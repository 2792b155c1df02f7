//! Historical product rows used to train the discount recommender.

use serde::{Deserialize, Serialize};

/// One product row of the pricing dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: String,
    pub daily_sales: f64,
    pub stock_available: f64,
    pub days_to_expiry: f64,
}

impl ProductRecord {
    pub fn new(
        product_id: impl Into<String>,
        daily_sales: f64,
        stock_available: f64,
        days_to_expiry: f64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            daily_sales,
            stock_available,
            days_to_expiry,
        }
    }
}
