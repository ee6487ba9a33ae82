//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many retail systems:                                                │
//! │    Ksh 4700.00 / 3 = 1566.67 (×3 = 4700.01)  → Invented Ksh 0.01!      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    470000 cents / 3 = 156666 rem 2                                      │
//! │    split_even gives [156667, 156667, 156666], which sums exactly       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bontez_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(320_000); // Ksh 3,200.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // Ksh 6,400.00
//! let total = price + Money::from_cents(75_000); // Ksh 3,950.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(3200.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents of a
/// Kenyan shilling).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and balance math
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the system flows through this type: product
/// prices, line subtotals, sale totals, paid amounts, installment amounts,
/// and report revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bontez_core::money::Money;
    ///
    /// let price = Money::from_cents(320_000); // Ksh 3,200.00
    /// assert_eq!(price.cents(), 320_000);
    /// ```
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The database, calculations, and API all use cents.
    /// Only the UI converts to shillings for display.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole shillings.
    ///
    /// ## Example
    /// ```rust
    /// use bontez_core::money::Money;
    ///
    /// let price = Money::from_shillings(3200); // Ksh 3,200.00
    /// assert_eq!(price.cents(), 320_000);
    /// ```
    #[inline]
    pub const fn from_shillings(shillings: i64) -> Self {
        Money(shillings * 100)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-shilling portion.
    ///
    /// ## Example
    /// ```rust
    /// use bontez_core::money::Money;
    ///
    /// let price = Money::from_cents(120_050);
    /// assert_eq!(price.shillings(), 1200);
    /// ```
    #[inline]
    pub const fn shillings(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the sub-shilling portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use bontez_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(75_000); // Ksh 750.00
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.cents(), 150_000); // Ksh 1,500.00
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Gas Cylinder 6Kg Refill, Ksh 1,200
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Subtotal: Ksh 2,400
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Splits the amount into `n` near-equal parts that sum exactly to the
    /// original amount.
    ///
    /// ## How The Remainder Is Handled
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  EXACT-SUM SPLIT                                                    │
    /// │                                                                     │
    /// │  470000 cents / 3 = 156666 remainder 2                              │
    /// │                                                                     │
    /// │  Naive division: [156666, 156666, 156666]  → sums to 469998 ❌     │
    /// │                                                                     │
    /// │  split_even:     [156667, 156667, 156666]  → sums to 470000 ✓      │
    /// │                  └── first `remainder` parts carry one extra cent   │
    /// │                                                                     │
    /// │  No part ever deviates from the others by more than one cent.       │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use bontez_core::money::Money;
    ///
    /// let parts = Money::from_cents(470_000).split_even(3);
    /// assert_eq!(parts.len(), 3);
    /// assert_eq!(parts.iter().map(Money::cents).sum::<i64>(), 470_000);
    /// ```
    ///
    /// ## Panics
    /// Does not panic: `n == 0` returns an empty vector. Callers validate
    /// the count before building an installment plan.
    pub fn split_even(&self, n: u32) -> Vec<Money> {
        if n == 0 {
            return Vec::new();
        }

        let n = n as i64;
        let base = self.0.div_euclid(n);
        let remainder = self.0.rem_euclid(n);

        (0..n)
            .map(|i| {
                if i < remainder {
                    Money(base + 1)
                } else {
                    Money(base)
                }
            })
            .collect()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}Ksh {}.{:02}",
            sign,
            self.shillings().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Sum of an iterator of Money values.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(120_099);
        assert_eq!(money.cents(), 120_099);
        assert_eq!(money.shillings(), 1200);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_shillings() {
        let money = Money::from_shillings(3200);
        assert_eq!(money.cents(), 320_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(120_099)), "Ksh 1200.99");
        assert_eq!(format!("{}", Money::from_cents(50_000)), "Ksh 500.00");
        assert_eq!(format!("{}", Money::from_cents(-55_050)), "-Ksh 550.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "Ksh 0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300]
            .iter()
            .map(|c| Money::from_cents(*c))
            .sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(75_000);
        let line_total = unit_price.multiply_quantity(2);
        assert_eq!(line_total.cents(), 150_000);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_cents(-100);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_split_even_exact() {
        let parts = Money::from_cents(300).split_even(3);
        assert_eq!(parts, vec![Money::from_cents(100); 3]);
    }

    /// Critical test: Ksh 4,700 / 3 must sum back to exactly Ksh 4,700.
    /// This is the installment-plan invariant.
    #[test]
    fn test_split_even_with_remainder() {
        let total = Money::from_cents(470_000);
        let parts = total.split_even(3);

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].cents(), 156_667);
        assert_eq!(parts[1].cents(), 156_667);
        assert_eq!(parts[2].cents(), 156_666);

        let sum: i64 = parts.iter().map(Money::cents).sum();
        assert_eq!(sum, total.cents());

        // No two parts differ by more than one cent
        let max = parts.iter().map(Money::cents).max().unwrap();
        let min = parts.iter().map(Money::cents).min().unwrap();
        assert!(max - min <= 1);
    }

    #[test]
    fn test_split_even_zero_parts() {
        assert!(Money::from_cents(100).split_even(0).is_empty());
    }

    #[test]
    fn test_split_even_single_part() {
        let parts = Money::from_cents(12_345).split_even(1);
        assert_eq!(parts, vec![Money::from_cents(12_345)]);
    }
}
