//! # Installment Plan Generation
//!
//! Builds the payment schedule for installment-plan sales.
//!
//! ## Plan Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sale created 2026-08-08, total Ksh 4,700, 3 installments               │
//! │                                                                         │
//! │  #1  due 2026-09-07 (+30d)   Ksh 1,566.67                               │
//! │  #2  due 2026-10-07 (+60d)   Ksh 1,566.67                               │
//! │  #3  due 2026-11-06 (+90d)   Ksh 1,566.66                               │
//! │                              ──────────────                             │
//! │                              Ksh 4,700.00  (sums exactly)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts come from [`Money::split_even`], so the schedule always sums to
//! the sale total with no lost or invented cents.

use chrono::{DateTime, Duration, Utc};

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::validate_installment_count;
use crate::INSTALLMENT_INTERVAL_DAYS;

/// One not-yet-persisted installment in a generated plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedInstallment {
    pub amount: Money,
    pub due_date: DateTime<Utc>,
}

/// Generates an installment plan for a sale.
///
/// ## Arguments
/// * `total` - The sale total to split
/// * `count` - Number of installments (validated, 1..=36)
/// * `start` - The sale date; due dates land at 30-day multiples after it
///
/// ## Example
/// ```rust
/// use bontez_core::installment::build_plan;
/// use bontez_core::money::Money;
/// use chrono::Utc;
///
/// let plan = build_plan(Money::from_cents(470_000), 3, Utc::now()).unwrap();
/// assert_eq!(plan.len(), 3);
/// assert_eq!(plan.iter().map(|p| p.amount.cents()).sum::<i64>(), 470_000);
/// ```
pub fn build_plan(
    total: Money,
    count: u32,
    start: DateTime<Utc>,
) -> Result<Vec<PlannedInstallment>, ValidationError> {
    validate_installment_count(count)?;

    let amounts = total.split_even(count);

    Ok(amounts
        .into_iter()
        .enumerate()
        .map(|(i, amount)| PlannedInstallment {
            amount,
            due_date: start + Duration::days(INSTALLMENT_INTERVAL_DAYS * (i as i64 + 1)),
        })
        .collect())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_plan_amounts_sum_to_total() {
        let start = Utc.with_ymd_and_hms(2026, 8, 8, 12, 0, 0).unwrap();
        let plan = build_plan(Money::from_cents(470_000), 3, start).unwrap();

        assert_eq!(plan.len(), 3);
        let sum: i64 = plan.iter().map(|p| p.amount.cents()).sum();
        assert_eq!(sum, 470_000);
    }

    #[test]
    fn test_due_dates_at_thirty_day_multiples() {
        let start = Utc.with_ymd_and_hms(2026, 8, 8, 12, 0, 0).unwrap();
        let plan = build_plan(Money::from_cents(300_000), 3, start).unwrap();

        assert_eq!(plan[0].due_date, start + Duration::days(30));
        assert_eq!(plan[1].due_date, start + Duration::days(60));
        assert_eq!(plan[2].due_date, start + Duration::days(90));
    }

    #[test]
    fn test_single_installment_plan() {
        let start = Utc.with_ymd_and_hms(2026, 8, 8, 12, 0, 0).unwrap();
        let plan = build_plan(Money::from_cents(120_000), 1, start).unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].amount.cents(), 120_000);
        assert_eq!(plan[0].due_date, start + Duration::days(30));
    }

    #[test]
    fn test_invalid_counts_rejected() {
        let start = Utc::now();
        assert!(build_plan(Money::from_cents(100), 0, start).is_err());
        assert!(build_plan(Money::from_cents(100), 37, start).is_err());
    }
}
