//! Amount validation and the conversion arithmetic.

use crate::core::rates::{BASE_CURRENCY, RateError, RateProvider, RateTable};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

/// Rejected user input for the amount field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is not a number")]
    NotNumeric,
    #[error("amount must be 1 or more")]
    OutOfRange,
}

/// Parses the raw amount text into a value the converter accepts.
///
/// Anything that does not parse as a finite number is rejected, and so
/// are values below 1.
pub fn parse_amount(raw: &str) -> Result<f64, AmountError> {
    let amount: f64 = raw.trim().parse().map_err(|_| AmountError::NotNumeric)?;
    if amount.is_nan() {
        return Err(AmountError::NotNumeric);
    }
    if !amount.is_finite() || amount < 1.0 {
        return Err(AmountError::OutOfRange);
    }
    Ok(amount)
}

/// One conversion as submitted: the pair is captured at submit time so a
/// swap performed while the request is in flight cannot change it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub per_unit_rate: f64,
    pub converted_amount: f64,
    /// When the service last refreshed the rates behind this result.
    pub as_of: Option<DateTime<Utc>>,
}

/// A requested code was absent from the fetched table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("no exchange rate for {0}")]
    RateNotFound(String),
}

/// Either stage of the fetch-then-convert pipeline failing.
#[derive(Debug, Error)]
pub enum ConversionFailure {
    #[error(transparent)]
    Rates(#[from] RateError),
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the per-unit rate and converted amount from a base-relative
/// rate table. Pure; the same request against the same table always
/// produces the same result.
pub fn convert(
    table: &RateTable,
    request: &ConversionRequest,
) -> Result<ConversionResult, ConvertError> {
    let from_rate = table
        .rate(&request.from)
        .ok_or_else(|| ConvertError::RateNotFound(request.from.clone()))?;
    let to_rate = table
        .rate(&request.to)
        .ok_or_else(|| ConvertError::RateNotFound(request.to.clone()))?;

    let per_unit = to_rate / from_rate;
    Ok(ConversionResult {
        from: request.from.clone(),
        to: request.to.clone(),
        amount: request.amount,
        per_unit_rate: round2(per_unit),
        converted_amount: round2(request.amount * per_unit),
        as_of: table.last_updated(),
    })
}

/// The whole request cycle: fetch the base-relative table, then convert.
pub async fn fetch_and_convert(
    provider: &(dyn RateProvider + Send + Sync),
    request: &ConversionRequest,
) -> Result<ConversionResult, ConversionFailure> {
    let table = provider.latest(BASE_CURRENCY).await?;
    debug!(
        "Fetched {} rates against {}",
        table.len(),
        BASE_CURRENCY
    );
    let result = convert(&table, request)?;
    Ok(result)
}
