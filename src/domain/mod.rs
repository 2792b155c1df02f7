//! Domain types for shelf-life pricing.
//!
//! This module provides:
//! - Pricing inputs and outputs for the fixed-rule engine
//! - Spoilage samples and outcomes for the Gompertz engine
//! - Inventory state for the end-of-day simulation
//! - Dataset rows for the discount recommender
//! - Money rendering backed by rust_decimal

pub mod inventory;
pub mod money;
pub mod pricing;
pub mod primitives;
pub mod record;
pub mod spoilage;

pub use inventory::{DayEvents, InventoryState};
pub use money::Money;
pub use pricing::{ProductPricingInput, ProductPricingOutput};
pub use primitives::{Classification, EngineKind, ShelfLifeType};
pub use record::ProductRecord;
pub use spoilage::{GompertzOutcome, SpoilageSample};
