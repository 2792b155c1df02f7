//! Modified Gompertz spoilage model and the continuous discount built on it.
//!
//! `N(tau, T) = A + C * exp(-exp(B(T) * (M(T) - tau)))` with
//! `B(T) = alpha_b * exp(beta_b * T)` and `M(T) = alpha_m * exp(beta_m * T)`.
//! `N` is in log10 cfu/g, `tau` in days, `T` in degrees Celsius.

use tracing::debug;

use crate::domain::{Classification, DayEvents, GompertzOutcome, InventoryState, SpoilageSample};

use super::inventory;
use super::numeric::{clamp, require_finite, require_non_negative, require_positive, require_within};
use super::PricingError;

/// Curve constants, spoilage thresholds and discount weights.
#[derive(Debug, Clone, PartialEq)]
pub struct GompertzParams {
    /// Initial load `A`.
    pub lower_asymptote: f64,
    /// `A + C`, the load the curve levels off at.
    pub upper_asymptote: f64,
    pub alpha_b: f64,
    pub beta_b: f64,
    pub alpha_m: f64,
    pub beta_m: f64,
    /// Near-spoilage threshold.
    pub eta_waste: f64,
    /// Must-discard threshold.
    pub eta_unsafe: f64,
    pub count_weight: f64,
    pub expiry_weight: f64,
    pub stock_weight: f64,
    /// Stock level treated as "high"; the stock factor reaches 1 here.
    pub high_stock_reference: f64,
    /// Storage temperatures (degrees Celsius) the curve is evaluated for.
    pub min_temperature: f64,
    pub max_temperature: f64,
}

impl Default for GompertzParams {
    fn default() -> Self {
        Self {
            lower_asymptote: 2.95,
            upper_asymptote: 7.56,
            alpha_b: 0.104,
            beta_b: 0.1573,
            alpha_m: 14.525,
            beta_m: -0.1365,
            eta_waste: 5.3,
            eta_unsafe: 6.0,
            count_weight: 0.4,
            expiry_weight: 0.4,
            stock_weight: 0.2,
            high_stock_reference: 200.0,
            min_temperature: -40.0,
            max_temperature: 60.0,
        }
    }
}

impl GompertzParams {
    /// Growth amplitude `C`.
    pub fn amplitude(&self) -> f64 {
        self.upper_asymptote - self.lower_asymptote
    }

    /// Growth-rate coefficient `B(T)`; increases with temperature.
    pub fn growth_rate(&self, temperature: f64) -> f64 {
        self.alpha_b * (self.beta_b * temperature).exp()
    }

    /// Inflection time `M(T)` in days; decreases with temperature.
    pub fn inflection_time(&self, temperature: f64) -> f64 {
        self.alpha_m * (self.beta_m * temperature).exp()
    }

    /// Microbial load `N(tau, T)` in log10 cfu/g.
    pub fn microbial_count(&self, age_days: f64, temperature: f64) -> f64 {
        let b = self.growth_rate(temperature);
        let m = self.inflection_time(temperature);
        self.lower_asymptote + self.amplitude() * (-(b * (m - age_days)).exp()).exp()
    }

    pub fn classify(&self, microbial_count: f64) -> Classification {
        if microbial_count >= self.eta_unsafe {
            Classification::Unsafe
        } else if microbial_count >= self.eta_waste {
            Classification::NearSpoilage
        } else {
            Classification::Safe
        }
    }
}

/// Continuous spoilage-driven discount model with a day-stepped inventory.
#[derive(Debug, Clone, Default)]
pub struct GompertzSpoilageEngine {
    params: GompertzParams,
}

impl GompertzSpoilageEngine {
    pub fn new(params: GompertzParams) -> Self {
        Self { params }
    }

    /// Estimate spoilage for a sample and derive its discount.
    ///
    /// # Errors
    /// Rejects non-finite fields, a temperature outside the model range,
    /// negative age or stock, a non-positive total shelf life, and a
    /// non-positive base price. A curve that still evaluates to a non-finite
    /// load or discount is rejected rather than classified.
    pub fn compute(&self, sample: &SpoilageSample) -> Result<GompertzOutcome, PricingError> {
        self.validate(sample)?;

        let microbial_count = require_finite(
            "microbialCount",
            self.params.microbial_count(sample.age_days, sample.temperature),
        )?;
        let discount_percent = require_finite(
            "discountPercent",
            self.discount_percent(
                microbial_count,
                sample.days_left,
                sample.total_shelf_life as f64,
                sample.stock_level,
            ),
        )?;
        let classification = self.params.classify(microbial_count);
        let discounted_price = sample
            .base_price
            .map(|price| price * (1.0 - discount_percent / 100.0));

        debug!(
            temperature = sample.temperature,
            age_days = sample.age_days,
            microbial_count,
            discount_percent,
            ?classification,
            "gompertz quote"
        );

        Ok(GompertzOutcome {
            microbial_count,
            discount_percent,
            classification,
            discounted_price,
        })
    }

    /// Weighted blend of load, shelf-life used and stock, in percent.
    ///
    /// Factors are not clamped individually; only the blend is clamped to
    /// `[0, 1]` before scaling.
    pub fn discount_percent(
        &self,
        microbial_count: f64,
        days_left: f64,
        total_shelf_life: f64,
        stock_level: f64,
    ) -> f64 {
        let p = &self.params;
        let count_factor =
            (microbial_count - p.lower_asymptote) / (p.eta_waste - p.lower_asymptote);
        let expiry_factor = (total_shelf_life - days_left) / total_shelf_life;
        let stock_factor = stock_level / p.high_stock_reference;

        let blended = p.count_weight * count_factor
            + p.expiry_weight * expiry_factor
            + p.stock_weight * stock_factor;
        clamp(blended, 0.0, 1.0) * 100.0
    }

    /// Units discarded at day end: everything once unsafe, otherwise nothing.
    pub fn wasted_units(&self, state: &InventoryState, microbial_count: Option<f64>) -> f64 {
        match microbial_count {
            Some(n) if self.params.classify(n).must_waste() => state.on_hand,
            _ => 0.0,
        }
    }

    /// Close the day for one inventory line, applying the waste policy.
    ///
    /// # Errors
    /// Rejects invalid sales or incoming quantities; `state` is untouched.
    pub fn end_of_day(
        &self,
        state: &InventoryState,
        daily_sales: f64,
        incoming_stock: f64,
        microbial_count: Option<f64>,
    ) -> Result<InventoryState, PricingError> {
        if let Some(n) = microbial_count {
            require_finite("microbialCount", n)?;
        }
        let wasted = self.wasted_units(state, microbial_count);
        inventory::step(state, DayEvents::new(daily_sales, incoming_stock, wasted))
    }

    fn validate(&self, sample: &SpoilageSample) -> Result<(), PricingError> {
        require_within(
            "temperature",
            sample.temperature,
            self.params.min_temperature,
            self.params.max_temperature,
        )?;
        require_non_negative("ageDays", sample.age_days)?;
        if sample.total_shelf_life <= 0 {
            return Err(PricingError::validation(
                "totalShelfLife",
                format!("must be > 0, got {}", sample.total_shelf_life),
            ));
        }
        require_finite("daysLeft", sample.days_left)?;
        require_non_negative("stockLevel", sample.stock_level)?;
        if let Some(price) = sample.base_price {
            require_positive("basePrice", price)?;
        }
        Ok(())
    }
}
