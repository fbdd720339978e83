//! # Error Types
//!
//! Validation errors raised before anything touches the store.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  heladeria-core (this file)                                            │
//! │  └── ValidationError  - Bad or missing input                           │
//! │                                                                         │
//! │  heladeria-db                                                          │
//! │  └── DbError          - Store failures, missing rows                   │
//! │                                                                         │
//! │  heladeria (app)                                                       │
//! │  └── AppError         - Validation | NotFound | Store                  │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → AppError → presentation             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. Every write path
/// checks its input first, so a `ValidationError` always means nothing was
/// written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is NaN.
    #[error("{field} must be a number")]
    NotANumber { field: String },

    /// Text could not be parsed (e.g. "abc" as a price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value cannot be stored (infinite price, total or daily sum past the storable range).
    #[error("{field} is out of range")]
    OutOfRange { field: String },

    /// Customer handed over less than the sale total.
    ///
    /// ## User Workflow
    /// ```text
    /// Total: $7.50, Tendered: $5.00
    ///      │
    ///      ▼
    /// InsufficientPayment { required: $7.50, tendered: $5.00 }
    ///      │
    ///      ▼
    /// Register shows: "Payment of $5.00 does not cover $7.50"
    /// ```
    #[error("Payment of {tendered} does not cover {required}")]
    InsufficientPayment { required: Money, tendered: Money },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("name").to_string(), "name is required");

        let err = ValidationError::invalid_format("unit_price", "not a number");
        assert_eq!(
            err.to_string(),
            "unit_price has invalid format: not a number"
        );
    }

    #[test]
    fn test_insufficient_payment_message() {
        let err = ValidationError::InsufficientPayment {
            required: Money::from_cents(750),
            tendered: Money::from_cents(500),
        };
        assert_eq!(err.to_string(), "Payment of $5.00 does not cover $7.50");
    }
}
