use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::discount::GompertzResponse;
use crate::api::AppState;
use crate::datasource::parse_payload;
use crate::domain::SpoilageSample;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NfcQuoteQuery {
    /// Evaluation date; defaults to the current UTC date.
    pub today: Option<NaiveDate>,
    /// Simulated days added on top of the calendar age.
    pub days_passed: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NfcQuoteResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub sample: SpoilageSample,
    pub quote: GompertzResponse,
}

/// Quote a product straight from a raw tag payload.
pub async fn post_nfc_quote(
    Query(params): Query<NfcQuoteQuery>,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<NfcQuoteResponse>, AppError> {
    let payload = parse_payload(&body, state.config.nfc_max_payload_bytes).map_err(|e| {
        tracing::warn!(bytes = body.len(), error = %e, "rejected NFC payload");
        AppError::from(e)
    })?;

    let today = params.today.unwrap_or_else(|| Utc::now().date_naive());
    let sample = payload.to_sample(today, params.days_passed.unwrap_or(0))?;
    let out = state.gompertz.compute(&sample)?;

    tracing::info!(
        product = payload.product_name.as_deref().unwrap_or("-"),
        age_days = sample.age_days,
        classification = ?out.classification,
        "NFC quote"
    );

    Ok(Json(NfcQuoteResponse {
        product_name: payload.product_name,
        sample,
        quote: out.try_into()?,
    }))
}
