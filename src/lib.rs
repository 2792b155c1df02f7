pub mod api;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod store;

pub use config::Config;
pub use datasource::{CsvDataSource, DataSourceError, MockDataSource, ProductDataSource};
pub use domain::{
    Classification, DayEvents, EngineKind, GompertzOutcome, InventoryState,
    ProductPricingInput, ProductPricingOutput, ProductRecord, ShelfLifeType, SpoilageSample,
};
pub use engine::{
    DiscountEngine, DiscountPolicy, DiscountQuote, FixedRuleDiscountEngine,
    GompertzSpoilageEngine, PricingError, PricingRequest,
};
pub use error::AppError;
pub use store::InventoryRegistry;
