//! Shared numeric checks and clamping.

use super::PricingError;

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::validation(field, format!("must be finite, got {}", value)))
    }
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<f64, PricingError> {
    let value = require_finite(field, value)?;
    if value < 0.0 {
        return Err(PricingError::validation(field, format!("must be >= 0, got {}", value)));
    }
    Ok(value)
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, PricingError> {
    let value = require_finite(field, value)?;
    if value <= 0.0 {
        return Err(PricingError::validation(field, format!("must be > 0, got {}", value)));
    }
    Ok(value)
}

pub(crate) fn require_within(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, PricingError> {
    let value = require_finite(field, value)?;
    if value < min || value > max {
        return Err(PricingError::validation(
            field,
            format!("must be within [{}, {}], got {}", min, max, value),
        ));
    }
    Ok(value)
}

/// Clamp into `[min, max]`. NaN passes through unchanged.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
