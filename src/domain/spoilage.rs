//! Spoilage sample and outcome for the Gompertz engine.

use serde::{Deserialize, Serialize};

use super::primitives::Classification;

/// A product observation at a point in its life.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpoilageSample {
    /// Storage temperature in degrees Celsius.
    pub temperature: f64,
    /// Days since manufacture, fractional when day-stepping.
    pub age_days: f64,
    /// Days from manufacture to label expiry.
    pub total_shelf_life: i64,
    /// `total_shelf_life - age_days`; negative once past expiry.
    pub days_left: f64,
    pub stock_level: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
}

impl SpoilageSample {
    pub fn new(temperature: f64, age_days: f64, total_shelf_life: i64, stock_level: f64) -> Self {
        Self {
            temperature,
            age_days,
            total_shelf_life,
            days_left: total_shelf_life as f64 - age_days,
            stock_level,
            base_price: None,
        }
    }

    pub fn with_base_price(mut self, base_price: f64) -> Self {
        self.base_price = Some(base_price);
        self
    }
}

/// Result of a Gompertz quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GompertzOutcome {
    /// log10 cfu/g at the sample's age and temperature.
    pub microbial_count: f64,
    /// Percent in [0, 100].
    pub discount_percent: f64,
    pub classification: Classification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_days_left() {
        let sample = SpoilageSample::new(4.0, 3.0, 10, 50.0);
        assert_eq!(sample.days_left, 7.0);
        assert_eq!(sample.base_price, None);

        let expired = SpoilageSample::new(4.0, 12.5, 10, 50.0);
        assert_eq!(expired.days_left, -2.5);
    }

    #[test]
    fn test_with_base_price() {
        let sample = SpoilageSample::new(4.0, 0.0, 8, 0.0).with_base_price(2.99);
        assert_eq!(sample.base_price, Some(2.99));
    }
}
