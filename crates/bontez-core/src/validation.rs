//! # Validation Module
//!
//! Input validation utilities for Bontez.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation layer (external)                                │
//! │  ├── Basic format checks (empty fields, numeric parsing)               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation before any write                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (supplier name, phone, ledger date)            │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_INSTALLMENT_COUNT, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a supplier name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 100 characters
///
/// Uniqueness is enforced by the database layer.
pub fn validate_supplier_name(name: &str) -> ValidationResult<()> {
    validate_name_field("supplier name", name, 100)
}

/// Validates a client name.
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    validate_name_field("client name", name, 100)
}

/// Validates a product name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name_field("product name", name, 100)
}

fn validate_name_field(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a client phone number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 15 characters
/// - Digits, plus an optional leading `+`
///
/// ## Example
/// ```rust
/// use bontez_core::validation::validate_phone;
///
/// assert!(validate_phone("0712345678").is_ok());
/// assert!(validate_phone("+254712345678").is_ok());
/// assert!(validate_phone("").is_err());
/// assert!(validate_phone("not a phone").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone.len() > 15 {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: 15,
        });
    }

    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits with an optional leading +".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional items)
///
/// ## Example
/// ```rust
/// use bontez_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(320_000).is_ok()); // Ksh 3,200
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the number of installments for an installment-plan sale.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_INSTALLMENT_COUNT (36)
pub fn validate_installment_count(count: u32) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::MustBePositive {
            field: "installment count".to_string(),
        });
    }

    if count > MAX_INSTALLMENT_COUNT {
        return Err(ValidationError::OutOfRange {
            field: "installment count".to_string(),
            min: 1,
            max: MAX_INSTALLMENT_COUNT as i64,
        });
    }

    Ok(())
}

/// Validates an installment payment against a sale's remaining balance.
///
/// ## Rules
/// - Amount must be positive
/// - Amount must not exceed the remaining balance
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Record Installment Payment                                             │
/// │                                                                         │
/// │  Sale: total Ksh 4,700 / paid Ksh 1,700 → remaining Ksh 3,000          │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_payment(amount, remaining) ← THIS FUNCTION                    │
/// │       │                                                                 │
/// │       ├── amount ≤ 0?          → Error: "payment amount must be positive"│
/// │       │                                                                 │
/// │       ├── amount > remaining?  → Error: out of range                    │
/// │       │                                                                 │
/// │       └── OK → paid += amount                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_payment(amount: Money, remaining: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    if amount > remaining {
        return Err(ValidationError::OutOfRange {
            field: "payment amount".to_string(),
            min: 1,
            max: remaining.cents(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_names() {
        assert!(validate_supplier_name("Top Gas").is_ok());
        assert!(validate_supplier_name("").is_err());
        assert!(validate_supplier_name("   ").is_err());
        assert!(validate_supplier_name(&"A".repeat(200)).is_err());

        assert!(validate_client_name("John Kariuki").is_ok());
        assert!(validate_product_name("Gas Cylinder 6Kg - New").is_ok());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("0712345678").is_ok());
        assert!(validate_phone("+254712345678").is_ok());

        assert!(validate_phone("").is_err());
        assert!(validate_phone("   ").is_err());
        assert!(validate_phone("07123456789012345").is_err());
        assert!(validate_phone("not a phone").is_err());
        assert!(validate_phone("+").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(320_000).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_installment_count() {
        assert!(validate_installment_count(1).is_ok());
        assert!(validate_installment_count(3).is_ok());
        assert!(validate_installment_count(36).is_ok());

        assert!(validate_installment_count(0).is_err());
        assert!(validate_installment_count(37).is_err());
    }

    #[test]
    fn test_validate_payment() {
        let remaining = Money::from_cents(300_000);

        assert!(validate_payment(Money::from_cents(100_000), remaining).is_ok());
        assert!(validate_payment(Money::from_cents(300_000), remaining).is_ok());

        assert!(validate_payment(Money::zero(), remaining).is_err());
        assert!(validate_payment(Money::from_cents(-100), remaining).is_err());
        assert!(validate_payment(Money::from_cents(300_001), remaining).is_err());
    }
}
