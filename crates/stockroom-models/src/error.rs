//! Error types for product operations.

use thiserror::Error;

/// Errors raised by product construction, mutation and decoding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A field value violates its invariant.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A stock removal asked for more than is on hand.
    #[error("not enough stock: available {available}, requested {requested}")]
    InsufficientStock { available: u32, requested: u32 },

    /// The product kind has no settable field with this name.
    #[error("{product_type} has no settable field '{field}'")]
    UnknownField { field: String, product_type: String },

    /// A persisted record carries a `type` tag that names no known variant.
    #[error("unknown product type: {0}")]
    UnknownProductType(String),

    /// A persisted record is missing fields or holds invalid values.
    #[error("malformed product record: {0}")]
    MalformedRecord(String),
}

impl ModelError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Returns true for field validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Result type alias for product operations.
pub type Result<T> = std::result::Result<T, ModelError>;
