//! Monetary helpers for product prices.
//!
//! Prices are stored as `Decimal` with a fixed scale of 2. The bulk price
//! adjustment computes in `f64` and crosses back into `Decimal` through the
//! shortest round-trip decimal string of the float, so the stored result
//! matches the legacy computation digit for digit.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::core::{AppError, Result};

/// Number of decimal places every stored price carries
pub const PRICE_SCALE: u32 = 2;

/// Magnitude above which a computed price no longer fits a `Decimal`
const MAX_PRICE_MAGNITUDE: f64 = 1e27;

/// Anything smaller than this rounds to zero at `PRICE_SCALE`
const ZERO_THRESHOLD: f64 = 0.001;

/// Rounds to `PRICE_SCALE` with round-half-to-even (banker's rounding).
///
/// The result always carries exactly `PRICE_SCALE` decimal places, so `0`
/// becomes `0.00`.
pub fn round_price(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(PRICE_SCALE);
    rounded
}

/// Validates that a price has at most `PRICE_SCALE` decimal places and is not negative
pub fn validate_price(amount: Decimal) -> std::result::Result<(), String> {
    if amount.scale() > PRICE_SCALE {
        return Err(format!(
            "Price must have at most {} decimal places, got {}",
            PRICE_SCALE,
            amount.scale()
        ));
    }

    if amount < Decimal::ZERO {
        return Err("Price cannot be negative".to_string());
    }

    Ok(())
}

/// Converts a stored price to the nearest `f64`.
pub fn price_to_f64(amount: Decimal) -> Result<f64> {
    amount
        .to_string()
        .parse::<f64>()
        .map_err(|e| AppError::internal(format!("Price {} is not convertible: {}", amount, e)))
}

/// Converts a computed `f64` into a `Decimal` rounded to `PRICE_SCALE`.
///
/// The float is first rendered as its shortest round-trip decimal string
/// (`121.00000000000001`, not the exact binary expansion), then rounded
/// half-to-even.
pub fn price_from_f64(value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "Computed price {} is not a finite number",
            value
        )));
    }

    if value.abs() >= MAX_PRICE_MAGNITUDE {
        return Err(AppError::validation(format!(
            "Computed price {} is out of range",
            value
        )));
    }

    if value.abs() < ZERO_THRESHOLD {
        return Ok(round_price(Decimal::ZERO));
    }

    let exact = Decimal::from_str(&value.to_string()).map_err(|e| {
        AppError::validation(format!("Computed price {} is not representable: {}", value, e))
    })?;

    Ok(round_price(exact))
}
