//! Argument validation shared by the contract surface.
//!
//! Transactions arrive with every argument as a string; these helpers turn
//! them into typed values or an `InvalidArgument` error naming the field.

use crate::shared::types::{DomainError, DomainResult};

pub fn require_non_empty<'a>(field: &str, value: &'a str) -> DomainResult<&'a str> {
    if value.is_empty() {
        return Err(DomainError::InvalidArgument(format!("{field} must not be empty")));
    }
    Ok(value)
}

pub fn parse_int(field: &str, raw: &str) -> DomainResult<i64> {
    raw.parse::<i64>().map_err(|e| {
        DomainError::InvalidArgument(format!("{field} must be an integer, got {raw:?}: {e}"))
    })
}

/// Parse a finite float. `NaN` and infinities are rejected since they cannot
/// be written as JSON numbers.
pub fn parse_float(field: &str, raw: &str) -> DomainResult<f64> {
    let value = raw.parse::<f64>().map_err(|e| {
        DomainError::InvalidArgument(format!("{field} must be a number, got {raw:?}: {e}"))
    })?;
    if !value.is_finite() {
        return Err(DomainError::InvalidArgument(format!(
            "{field} must be finite, got {raw:?}"
        )));
    }
    Ok(value)
}
