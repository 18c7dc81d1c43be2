//! Decimal parsing at the mutation boundary and display rounding at render time.
//!
//! Amounts are kept as unrounded `f64` everywhere in the engine. Rounding to two
//! decimals happens only when a value is turned into text.

use crate::error::{BillingError, BillingResult};

/// Parse operator input as a non-negative, finite decimal.
///
/// Accepts either `.` or `,` as the decimal separator (`"4,99"` is 4.99).
/// Surrounding whitespace is ignored.
pub fn parse_decimal(raw: &str) -> BillingResult<f64> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(BillingError::invalid_numeric(raw));
    }

    let normalized;
    let text = if text.contains(',') && !text.contains('.') && text.matches(',').count() == 1 {
        normalized = text.replace(',', ".");
        normalized.as_str()
    } else {
        text
    };

    let value: f64 = text
        .parse()
        .map_err(|_| BillingError::invalid_numeric(raw))?;

    if !value.is_finite() || value < 0.0 {
        return Err(BillingError::invalid_numeric(raw));
    }

    // -0.0 parses successfully; keep it out of the model.
    Ok(value + 0.0)
}

/// Two-decimal display form of an amount (`0.224` -> `"0.22"`).
pub fn format_amount(value: f64) -> String {
    let text = format!("{value:.2}");
    if text == "-0.00" { "0.00".to_string() } else { text }
}

/// Compact display form of a quantity: up to three decimals, no trailing zeros.
pub fn format_quantity(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
