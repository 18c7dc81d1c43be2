//! Engine error model.

use thiserror::Error;

/// Result type used across the billing engine.
pub type BillingResult<T> = Result<T, BillingError>;

/// Engine-level error.
///
/// Keep this focused on deterministic failures of engine operations (row
/// addressing, input validation). Rendering and IO failures are reported by the
/// crates that own them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BillingError {
    /// A catalog lookup did not match any product.
    #[error("not found")]
    NotFound,

    /// A row index did not address a line of the ledger.
    #[error("row {row} is out of range (ledger has {len} rows)")]
    OutOfRange { row: usize, len: usize },

    /// A quantity or price could not be parsed as a non-negative number.
    #[error("invalid numeric value: {0:?}")]
    InvalidNumeric(String),

    /// A value failed validation (e.g. an empty barcode).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl BillingError {
    pub fn out_of_range(row: usize, len: usize) -> Self {
        Self::OutOfRange { row, len }
    }

    pub fn invalid_numeric(raw: impl Into<String>) -> Self {
        Self::InvalidNumeric(raw.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
