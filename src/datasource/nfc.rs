//! NFC tag payload adapter.
//!
//! Tags carry a small JSON record written by the packing line. Numbers may be
//! JSON numbers or numeric strings, since tags are often written from form
//! input.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::domain::SpoilageSample;

pub const DEFAULT_STORAGE_TEMP: f64 = 4.0;
pub const DEFAULT_STOCK_LEVEL: f64 = 50.0;
pub const DEFAULT_BASE_PRICE: f64 = 2.99;

#[derive(Debug, Error, PartialEq)]
pub enum PayloadError {
    #[error("payload of {size} bytes exceeds limit of {max} bytes")]
    TooLarge { size: usize, max: usize },
    #[error("malformed payload: {0}")]
    Json(String),
    #[error("invalid date in {field}: {value}")]
    Date { field: &'static str, value: String },
    #[error("expiry date {expiry} is not after manufacturing date {manufactured}")]
    ExpiryBeforeManufacture {
        manufactured: NaiveDate,
        expiry: NaiveDate,
    },
}

/// A decoded tag record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NfcPayload {
    #[serde(default)]
    pub product_name: Option<String>,
    pub manufacturing_date: String,
    pub expiry_date: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub storage_temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub stock_level: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub base_price: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Numeric>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Numeric::Number(n)) => Ok(Some(n)),
        Some(Numeric::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Numeric::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("not a number: {}", s))),
    }
}

/// Decode a raw tag payload, enforcing the size bound before parsing.
pub fn parse_payload(bytes: &[u8], max_bytes: usize) -> Result<NfcPayload, PayloadError> {
    if bytes.len() > max_bytes {
        return Err(PayloadError::TooLarge {
            size: bytes.len(),
            max: max_bytes,
        });
    }
    serde_json::from_slice(bytes).map_err(|e| PayloadError::Json(e.to_string()))
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, PayloadError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| PayloadError::Date {
            field,
            value: value.to_string(),
        })
}

impl NfcPayload {
    pub fn manufactured_on(&self) -> Result<NaiveDate, PayloadError> {
        parse_date("manufacturingDate", &self.manufacturing_date)
    }

    pub fn expires_on(&self) -> Result<NaiveDate, PayloadError> {
        parse_date("expiryDate", &self.expiry_date)
    }

    /// Build a spoilage sample as of `today`, shifted by `days_passed`
    /// simulated days.
    pub fn to_sample(&self, today: NaiveDate, days_passed: u32) -> Result<SpoilageSample, PayloadError> {
        let manufactured = self.manufactured_on()?;
        let expiry = self.expires_on()?;
        if expiry <= manufactured {
            return Err(PayloadError::ExpiryBeforeManufacture {
                manufactured,
                expiry,
            });
        }

        let age_days = (today - manufactured).num_days() + i64::from(days_passed);
        let total_shelf_life = (expiry - manufactured).num_days();

        let sample = SpoilageSample::new(
            self.storage_temp.unwrap_or(DEFAULT_STORAGE_TEMP),
            age_days as f64,
            total_shelf_life,
            self.stock_level.unwrap_or(DEFAULT_STOCK_LEVEL),
        );
        Ok(sample.with_base_price(self.base_price.unwrap_or(DEFAULT_BASE_PRICE)))
    }
}
