//! Internal helpers for input validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize the
//! write-side validation so every append rejects bad input before touching the
//! database.

use crate::{EngineError, ResultEngine};

/// Validate a currency value: finite and strictly positive.
pub(crate) fn positive_amount(value: f64, label: &str) -> ResultEngine<f64> {
    if !value.is_finite() {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be a finite number"
        )));
    }
    if value <= 0.0 {
        return Err(EngineError::InvalidAmount(format!("{label} must be > 0")));
    }
    Ok(value)
}

/// Trim required text and reject it when blank.
pub(crate) fn required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim optional free text, falling back to `default` when blank.
pub(crate) fn text_or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Trim an optional name. Absent stays absent and an empty string stays empty.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value.map(|s| s.trim().to_string())
}

/// Convert a caller quantity into its column representation.
pub(crate) fn quantity_column(quantity: u64) -> ResultEngine<i64> {
    if quantity == 0 {
        return Err(EngineError::InvalidInput(
            "quantity must be > 0".to_string(),
        ));
    }
    i64::try_from(quantity)
        .map_err(|_| EngineError::InvalidInput("quantity is too large".to_string()))
}

/// Convert a stored quantity back to the caller representation.
pub(crate) fn stored_quantity(quantity: i64) -> ResultEngine<u64> {
    u64::try_from(quantity)
        .map_err(|_| EngineError::InvalidInput(format!("invalid stored quantity: {quantity}")))
}

/// `quantity * unit` in plain double precision. No rounding is applied.
pub(crate) fn line_total(quantity: u64, unit: f64, label: &str) -> ResultEngine<f64> {
    let total = quantity as f64 * unit;
    if !total.is_finite() {
        return Err(EngineError::InvalidAmount(format!(
            "{label} overflows: {quantity} x {unit}"
        )));
    }
    Ok(total)
}
