use tracing::debug;

use crate::domain::{ProductPricingInput, ProductPricingOutput, ShelfLifeType};

use super::numeric::{clamp, require_finite, require_non_negative, require_positive, require_within};
use super::PricingError;

/// Threshold tables for the fixed-rule engine.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRuleParams {
    /// Used when an FSL input omits `total_shelf_life`.
    pub default_total_shelf_life: i64,
    /// FSL tier for `remaining_days <= 0`.
    pub expired_discount: f64,
    /// FSL tier for the last day.
    pub last_day_discount: f64,
    /// FSL tier for the day before the last.
    pub penultimate_day_discount: f64,
    /// FSL tier for everything further out.
    pub base_discount: f64,
    /// DSL load (log cfu/g) where discounting starts.
    pub discount_threshold: f64,
    /// DSL load (log cfu/g) at which the product is waste.
    pub waste_threshold: f64,
    /// DSL discount reached just below `waste_threshold`.
    pub max_interpolated_discount: f64,
    pub high_stock_ratio: f64,
    pub high_stock_uplift: f64,
    pub moderate_stock_ratio: f64,
    pub moderate_stock_uplift: f64,
    /// Soft cap; the cost floor may still push past it.
    pub discount_ceiling: f64,
}

impl Default for FixedRuleParams {
    fn default() -> Self {
        Self {
            default_total_shelf_life: 8,
            expired_discount: 1.0,
            last_day_discount: 0.5,
            penultimate_day_discount: 0.3,
            base_discount: 0.1,
            discount_threshold: 4.7,
            waste_threshold: 5.3,
            max_interpolated_discount: 0.7,
            high_stock_ratio: 2.0,
            high_stock_uplift: 0.2,
            moderate_stock_ratio: 1.0,
            moderate_stock_uplift: 0.1,
            discount_ceiling: 0.8,
        }
    }
}

/// Two-branch discount model: FSL day tiers or DSL microbial thresholds,
/// capped at a ceiling and never priced below cost.
#[derive(Debug, Clone, Default)]
pub struct FixedRuleDiscountEngine {
    params: FixedRuleParams,
}

impl FixedRuleDiscountEngine {
    pub fn new(params: FixedRuleParams) -> Self {
        Self { params }
    }

    /// Compute the recommended discount for a product.
    ///
    /// # Errors
    /// Rejects non-finite or out-of-range fields and a missing
    /// branch-specific field (`remainingDays` for FSL, `currentMicro` for DSL).
    pub fn compute(&self, input: &ProductPricingInput) -> Result<ProductPricingOutput, PricingError> {
        self.validate(input)?;

        let cost_price = input.cost_price();

        let raw = match input.shelf_life_type {
            ShelfLifeType::Fsl => {
                // validate() guarantees presence
                let remaining_days = input.remaining_days.unwrap_or_default();
                self.fsl_base_discount(remaining_days) * (1.0 + input.lefo_fraction)
            }
            ShelfLifeType::Dsl => {
                let micro = input.current_micro.unwrap_or_default();
                self.dsl_quality_discount(micro)
                    + self.stock_uplift(input.current_inventory, input.weekly_demand)
            }
        };

        let mut discount = clamp(raw, 0.0, self.params.discount_ceiling);
        let mut discounted_price = input.original_price * (1.0 - discount);

        let cost_floor_applied = discounted_price < cost_price;
        if cost_floor_applied {
            debug!(
                original_price = input.original_price,
                cost_price,
                capped_discount = discount,
                "cost floor overrides discount"
            );
            discount = (input.original_price - cost_price) / input.original_price;
            discounted_price = cost_price;
        }

        let final_profit_margin = (discounted_price - cost_price) / discounted_price * 100.0;

        Ok(ProductPricingOutput {
            recommended_discount: discount * 100.0,
            discounted_price,
            final_profit_margin,
            cost_price,
            cost_floor_applied,
        })
    }

    /// FSL tier for the given days to expiry, before LEFO scaling.
    pub fn fsl_base_discount(&self, remaining_days: i64) -> f64 {
        match remaining_days {
            d if d <= 0 => self.params.expired_discount,
            1 => self.params.last_day_discount,
            2 => self.params.penultimate_day_discount,
            _ => self.params.base_discount,
        }
    }

    /// DSL discount from microbial load alone, before the stock uplift.
    pub fn dsl_quality_discount(&self, current_micro: f64) -> f64 {
        let p = &self.params;
        if current_micro >= p.waste_threshold {
            1.0
        } else if current_micro >= p.discount_threshold {
            let range = p.waste_threshold - p.discount_threshold;
            (current_micro - p.discount_threshold) / range * p.max_interpolated_discount
        } else {
            0.0
        }
    }

    /// Extra DSL discount when stock exceeds daily demand.
    pub fn stock_uplift(&self, current_inventory: f64, weekly_demand: f64) -> f64 {
        let stock_ratio = current_inventory / (weekly_demand / 7.0);
        if stock_ratio > self.params.high_stock_ratio {
            self.params.high_stock_uplift
        } else if stock_ratio > self.params.moderate_stock_ratio {
            self.params.moderate_stock_uplift
        } else {
            0.0
        }
    }

    /// Total shelf life an FSL input is evaluated against.
    pub fn effective_total_shelf_life(&self, input: &ProductPricingInput) -> i64 {
        input
            .total_shelf_life
            .unwrap_or(self.params.default_total_shelf_life)
    }

    fn validate(&self, input: &ProductPricingInput) -> Result<(), PricingError> {
        require_positive("originalPrice", input.original_price)?;
        require_within("profitMargin", input.profit_margin, 0.0, 100.0)?;
        require_within("lefoFraction", input.lefo_fraction, 0.0, 1.0)?;
        require_non_negative("currentInventory", input.current_inventory)?;
        require_non_negative("weeklyDemand", input.weekly_demand)?;

        match input.shelf_life_type {
            ShelfLifeType::Fsl => {
                if input.remaining_days.is_none() {
                    return Err(PricingError::MissingField {
                        field: "remainingDays",
                        branch: ShelfLifeType::Fsl.as_str(),
                    });
                }
                let total = self.effective_total_shelf_life(input);
                if total <= 0 {
                    return Err(PricingError::validation(
                        "totalShelfLife",
                        format!("must be > 0, got {}", total),
                    ));
                }
            }
            ShelfLifeType::Dsl => {
                let micro = input.current_micro.ok_or(PricingError::MissingField {
                    field: "currentMicro",
                    branch: ShelfLifeType::Dsl.as_str(),
                })?;
                require_finite("currentMicro", micro)?;
                require_positive("weeklyDemand", input.weekly_demand)?;
            }
        }
        Ok(())
    }
}
