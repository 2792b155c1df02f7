use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::{
    Classification, EngineKind, GompertzOutcome, Money, ProductPricingInput, ProductPricingOutput,
    SpoilageSample,
};
use crate::engine::{DiscountQuote, PricingRequest};
use crate::error::AppError;

/// Render an engine value; engines only return finite values, so a failure
/// here is a server fault.
fn money(field: &str, value: f64) -> Result<Money, AppError> {
    Money::from_f64(value)
        .ok_or_else(|| AppError::Internal(format!("{} is not a finite amount: {}", field, value)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedRuleResponse {
    pub engine: EngineKind,
    pub recommended_discount: Money,
    pub discounted_price: Money,
    pub final_profit_margin: Money,
    pub cost_price: Money,
    pub cost_floor_applied: bool,
}

impl TryFrom<ProductPricingOutput> for FixedRuleResponse {
    type Error = AppError;

    fn try_from(out: ProductPricingOutput) -> Result<Self, Self::Error> {
        Ok(Self {
            engine: EngineKind::FixedRule,
            recommended_discount: money("recommendedDiscount", out.recommended_discount)?,
            discounted_price: money("discountedPrice", out.discounted_price)?,
            final_profit_margin: money("finalProfitMargin", out.final_profit_margin)?,
            cost_price: money("costPrice", out.cost_price)?,
            cost_floor_applied: out.cost_floor_applied,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GompertzResponse {
    pub engine: EngineKind,
    pub microbial_count: f64,
    pub discount_percent: Money,
    pub classification: Classification,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<Money>,
}

impl TryFrom<GompertzOutcome> for GompertzResponse {
    type Error = AppError;

    fn try_from(out: GompertzOutcome) -> Result<Self, Self::Error> {
        let discounted_price = out
            .discounted_price
            .map(|price| money("discountedPrice", price))
            .transpose()?;
        Ok(Self {
            engine: EngineKind::Gompertz,
            microbial_count: out.microbial_count,
            discount_percent: money("discountPercent", out.discount_percent)?,
            classification: out.classification,
            message: out.classification.message(),
            discounted_price,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QuoteResponse {
    FixedRule(FixedRuleResponse),
    Gompertz(GompertzResponse),
}

impl TryFrom<DiscountQuote> for QuoteResponse {
    type Error = AppError;

    fn try_from(quote: DiscountQuote) -> Result<Self, Self::Error> {
        Ok(match quote {
            DiscountQuote::FixedRule(out) => QuoteResponse::FixedRule(out.try_into()?),
            DiscountQuote::Gompertz(out) => QuoteResponse::Gompertz(out.try_into()?),
        })
    }
}

/// Gompertz request body; `daysLeft` is derived when omitted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GompertzRequest {
    pub temperature: f64,
    pub age_days: f64,
    pub total_shelf_life: i64,
    pub days_left: Option<f64>,
    pub stock_level: f64,
    pub base_price: Option<f64>,
}

impl From<GompertzRequest> for SpoilageSample {
    fn from(req: GompertzRequest) -> Self {
        let mut sample = SpoilageSample::new(
            req.temperature,
            req.age_days,
            req.total_shelf_life,
            req.stock_level,
        );
        if let Some(days_left) = req.days_left {
            sample.days_left = days_left;
        }
        sample.base_price = req.base_price;
        sample
    }
}

/// Price with whichever strategy the service is configured for.
pub async fn post_discount(
    State(state): State<AppState>,
    Json(request): Json<PricingRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let quote = state.engine.quote(&request)?;
    tracing::info!(
        engine = %state.engine.kind(),
        discount = quote.discount_percent(),
        "discount quoted"
    );
    Ok(Json(quote.try_into()?))
}

pub async fn post_fixed_rule(
    State(state): State<AppState>,
    Json(input): Json<ProductPricingInput>,
) -> Result<Json<FixedRuleResponse>, AppError> {
    let out = state.fixed_rule.compute(&input)?;
    tracing::info!(
        shelf_life_type = %input.shelf_life_type,
        discount = out.recommended_discount,
        cost_floor = out.cost_floor_applied,
        "fixed-rule discount quoted"
    );
    Ok(Json(out.try_into()?))
}

pub async fn post_gompertz(
    State(state): State<AppState>,
    Json(request): Json<GompertzRequest>,
) -> Result<Json<GompertzResponse>, AppError> {
    let sample = SpoilageSample::from(request);
    let out = state.gompertz.compute(&sample)?;
    tracing::info!(
        microbial_count = out.microbial_count,
        discount = out.discount_percent,
        classification = ?out.classification,
        "gompertz discount quoted"
    );
    Ok(Json(out.try_into()?))
}
