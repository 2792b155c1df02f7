//! Currency amounts for display, backed by rust_decimal.
//!
//! Engines compute in `f64`; conversion into `Money` happens at the edge where
//! prices are rendered as two-decimal strings.

use rust_decimal::{Decimal as RustDecimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;

/// Number of decimal places used when rendering currency and percentages.
pub const DISPLAY_SCALE: u32 = 2;

/// A currency (or percentage) amount rounded to two decimal places.
///
/// Serializes as a string with exactly two decimals ("32.00").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Money(RustDecimal);

impl Money {
    /// Convert an engine value into a rounded amount.
    ///
    /// Returns `None` for NaN and infinities, which have no decimal form.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        RustDecimal::from_f64_retain(value).map(|d| {
            let mut rounded =
                d.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(DISPLAY_SCALE);
            Money(rounded)
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_rounds_to_cents() {
        let m = Money::from_f64(16.666).unwrap();
        assert_eq!(m.to_string(), "16.67");
    }

    #[test]
    fn test_money_pads_to_two_places() {
        assert_eq!(Money::from_f64(32.0).unwrap().to_string(), "32.00");
        assert_eq!(Money::from_f64(0.5).unwrap().to_string(), "0.50");
        assert_eq!(Money::from_f64(100.0).unwrap().to_string(), "100.00");
    }

    #[test]
    fn test_money_midpoint_rounds_away_from_zero() {
        assert_eq!(Money::from_f64(0.125).unwrap().to_string(), "0.13");
    }

    #[test]
    fn test_money_rejects_non_finite() {
        assert!(Money::from_f64(f64::NAN).is_none());
        assert!(Money::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_money_serializes_as_string() {
        let json = serde_json::to_value(Money::from_f64(2.99).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!("2.99"));
    }
}
