//! Pure computation engines for shelf-life pricing.
//!
//! Two strategies price the same product question: a fixed rule table
//! ([`FixedRuleDiscountEngine`]) and a continuous microbial growth model
//! ([`GompertzSpoilageEngine`]). Both validate their input up front and
//! return [`PricingError`] instead of propagating NaN or infinities.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::{
    EngineKind, GompertzOutcome, ProductPricingInput, ProductPricingOutput, SpoilageSample,
};

pub mod fixed_rule;
pub mod gompertz;
pub mod inventory;
pub mod numeric;
pub mod q_learning;

pub use fixed_rule::{FixedRuleDiscountEngine, FixedRuleParams};
pub use gompertz::{GompertzParams, GompertzSpoilageEngine};
pub use q_learning::{DiscountPolicy, QLearningAgent, QLearningParams, DISCOUNT_ACTIONS};

/// Errors raised by engine input validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("missing {field}, required for {branch} pricing")]
    MissingField {
        field: &'static str,
        branch: &'static str,
    },
    #[error("{engine} engine cannot price a {request} request")]
    EngineMismatch {
        engine: EngineKind,
        request: EngineKind,
    },
}

impl PricingError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        PricingError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending input field, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            PricingError::Validation { field, .. } | PricingError::MissingField { field, .. } => {
                Some(field)
            }
            PricingError::EngineMismatch { .. } => None,
        }
    }
}

/// Input to a [`DiscountEngine`], tagged with the strategy it targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "engine", rename_all = "camelCase")]
pub enum PricingRequest {
    FixedRule(ProductPricingInput),
    Gompertz(SpoilageSample),
}

impl PricingRequest {
    pub fn kind(&self) -> EngineKind {
        match self {
            PricingRequest::FixedRule(_) => EngineKind::FixedRule,
            PricingRequest::Gompertz(_) => EngineKind::Gompertz,
        }
    }
}

/// Output of a [`DiscountEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "engine", rename_all = "camelCase")]
pub enum DiscountQuote {
    FixedRule(ProductPricingOutput),
    Gompertz(GompertzOutcome),
}

impl DiscountQuote {
    /// Recommended discount in percent.
    pub fn discount_percent(&self) -> f64 {
        match self {
            DiscountQuote::FixedRule(out) => out.recommended_discount,
            DiscountQuote::Gompertz(out) => out.discount_percent,
        }
    }

    /// Discounted price, when the request carried a price.
    pub fn discounted_price(&self) -> Option<f64> {
        match self {
            DiscountQuote::FixedRule(out) => Some(out.discounted_price),
            DiscountQuote::Gompertz(out) => out.discounted_price,
        }
    }
}

/// A discount strategy. Implementations are stateless and safe to share.
pub trait DiscountEngine: Send + Sync + fmt::Debug {
    fn kind(&self) -> EngineKind;

    /// Price a request.
    ///
    /// # Errors
    /// Returns [`PricingError::EngineMismatch`] when the request targets the
    /// other strategy, and a validation error for out-of-domain input.
    fn quote(&self, request: &PricingRequest) -> Result<DiscountQuote, PricingError>;
}

impl DiscountEngine for FixedRuleDiscountEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::FixedRule
    }

    fn quote(&self, request: &PricingRequest) -> Result<DiscountQuote, PricingError> {
        match request {
            PricingRequest::FixedRule(input) => self.compute(input).map(DiscountQuote::FixedRule),
            other => Err(PricingError::EngineMismatch {
                engine: self.kind(),
                request: other.kind(),
            }),
        }
    }
}

impl DiscountEngine for GompertzSpoilageEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Gompertz
    }

    fn quote(&self, request: &PricingRequest) -> Result<DiscountQuote, PricingError> {
        match request {
            PricingRequest::Gompertz(sample) => self.compute(sample).map(DiscountQuote::Gompertz),
            other => Err(PricingError::EngineMismatch {
                engine: self.kind(),
                request: other.kind(),
            }),
        }
    }
}

/// Build an engine of the given kind with default parameters.
pub fn build(kind: EngineKind) -> Box<dyn DiscountEngine> {
    match kind {
        EngineKind::FixedRule => Box::new(FixedRuleDiscountEngine::default()),
        EngineKind::Gompertz => Box::new(GompertzSpoilageEngine::default()),
    }
}
