//! Domain primitives: ShelfLifeType, Classification, EngineKind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which shelf-life signal drives a fixed-rule discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShelfLifeType {
    /// Fixed shelf life: calendar days remaining.
    #[serde(rename = "FSL")]
    Fsl,
    /// Dynamic shelf life: measured or estimated microbial load.
    #[serde(rename = "DSL")]
    Dsl,
}

impl ShelfLifeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShelfLifeType::Fsl => "FSL",
            ShelfLifeType::Dsl => "DSL",
        }
    }
}

impl fmt::Display for ShelfLifeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spoilage class of a product given its microbial count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Safe,
    NearSpoilage,
    Unsafe,
}

impl Classification {
    /// Human-readable advice shown next to a quote.
    pub fn message(&self) -> &'static str {
        match self {
            Classification::Safe => "Product is safe to sell.",
            Classification::NearSpoilage => {
                "Product near spoilage threshold. High discount recommended."
            }
            Classification::Unsafe => "Product is unsafe (>= 6 log cfu/g). Must be wasted.",
        }
    }

    pub fn must_waste(&self) -> bool {
        matches!(self, Classification::Unsafe)
    }
}

/// Discount strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineKind {
    FixedRule,
    Gompertz,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::FixedRule => write!(f, "fixed_rule"),
            EngineKind::Gompertz => write!(f, "gompertz"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shelf_life_type_serialization() {
        assert_eq!(serde_json::to_string(&ShelfLifeType::Fsl).unwrap(), "\"FSL\"");
        let dsl: ShelfLifeType = serde_json::from_str("\"DSL\"").unwrap();
        assert_eq!(dsl, ShelfLifeType::Dsl);
    }

    #[test]
    fn test_classification_serialization() {
        let json = serde_json::to_string(&Classification::NearSpoilage).unwrap();
        assert_eq!(json, "\"NEAR_SPOILAGE\"");
    }

    #[test]
    fn test_only_unsafe_must_waste() {
        assert!(Classification::Unsafe.must_waste());
        assert!(!Classification::NearSpoilage.must_waste());
        assert!(!Classification::Safe.must_waste());
    }

    #[test]
    fn test_engine_kind_display() {
        assert_eq!(EngineKind::FixedRule.to_string(), "fixed_rule");
        assert_eq!(EngineKind::Gompertz.to_string(), "gompertz");
    }
}
