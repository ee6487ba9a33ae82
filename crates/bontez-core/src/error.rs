//! # Error Types
//!
//! Domain-specific error types for bontez-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bontez-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bontez-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → presentation layer      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (id, field, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Referenced client does not exist.
    #[error("Client not found: {0}")]
    ClientNotFound(i64),

    /// Referenced supplier does not exist.
    #[error("Supplier not found: {0}")]
    SupplierNotFound(i64),

    /// Referenced product does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Referenced sale does not exist.
    #[error("Sale not found: {0}")]
    SaleNotFound(i64),

    /// A sale was submitted with no line items.
    ///
    /// ## When This Occurs
    /// - The item list was empty, or every entry had a blank product
    ///
    /// ## User Workflow
    /// ```text
    /// Submit sale (items: [])
    ///      │
    ///      ▼
    /// EmptySale
    ///      │
    ///      ▼
    /// UI shows: "Sale must have at least one item"
    /// ```
    #[error("Sale must have at least one item")]
    EmptySale,

    /// Payment amount is invalid.
    ///
    /// ## When This Occurs
    /// - Recording a non-positive installment payment
    /// - Payment exceeds the sale's remaining balance
    #[error("Invalid payment amount: requested {requested}, remaining balance {remaining}")]
    InvalidPaymentAmount { requested: Money, remaining: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid date, bad phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate phone, supplier name, ledger date).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidPaymentAmount {
            requested: Money::from_cents(500_000),
            remaining: Money::from_cents(170_000),
        };
        assert_eq!(
            err.to_string(),
            "Invalid payment amount: requested Ksh 5000.00, remaining balance Ksh 1700.00"
        );

        assert_eq!(
            CoreError::ClientNotFound(42).to_string(),
            "Client not found: 42"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "phone".to_string(),
        };
        assert_eq!(err.to_string(), "phone is required");

        let err = ValidationError::Duplicate {
            field: "supplier name".to_string(),
            value: "Top Gas".to_string(),
        };
        assert_eq!(err.to_string(), "supplier name 'Top Gas' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "phone".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
