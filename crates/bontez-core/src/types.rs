//! # Domain Types
//!
//! Core domain types used throughout Bontez.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Supplier     │   │     Client      │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name (unique)  │   │  phone (unique) │   │  supplier_id?   │       │
//! │  │  color          │   │  email, address │   │  price_cents    │       │
//! │  └────────┬────────┘   └────────┬────────┘   └────────┬────────┘       │
//! │           │ cascades            │ cascades            │ snapshot       │
//! │           ▼                     ▼                     ▼                │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │                          Sale                               │       │
//! │  │  payment_method ∈ {cash, mobile_money, installment}         │       │
//! │  │  total_cents = Σ item subtotals   paid_cents ≤ total_cents  │       │
//! │  └───────────┬──────────────────────────────┬──────────────────┘       │
//! │              │ owns                          │ owns                    │
//! │              ▼                               ▼                         │
//! │  ┌─────────────────┐              ┌─────────────────┐                  │
//! │  │    SaleItem     │              │   Installment   │                  │
//! │  │  qty ≥ 1        │              │  due_date       │                  │
//! │  │  unit_price     │              │  is_paid flag   │                  │
//! │  │  (frozen)       │              │  Σ = total      │                  │
//! │  └─────────────────┘              └─────────────────┘                  │
//! │                                                                         │
//! │  AccessorySale: one ledger row per calendar day (eight categories)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity is integer-identified (`INTEGER PRIMARY KEY AUTOINCREMENT`)
//! and creation-timestamped. Business uniqueness lives on natural columns
//! (supplier name, client phone, ledger date).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Supplier
// =============================================================================

/// A gas supplier (brand) the shop stocks cylinders from.
///
/// The `color` is the chart color used by supplier-breakdown reports.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Supplier {
    pub id: i64,
    /// Brand name, unique across all suppliers.
    pub name: String,
    /// Chart color for this supplier's report slices.
    pub color: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale (gas cylinder or accessory).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    pub id: i64,

    /// Display name, e.g. "Gas Cylinder 6Kg - Refill".
    pub name: String,

    /// Owning supplier; None for unbranded accessories.
    pub supplier_id: Option<i64>,

    /// Stored category, e.g. "cylinder_6kg", "accessory_burner".
    ///
    /// Reports currently classify by product *name* (see
    /// [`ProductType::classify`]); this column is the explicit field a
    /// future report can switch to.
    pub category: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Optional description for product details.
    pub description: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Client
// =============================================================================

/// A customer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Client {
    pub id: i64,
    pub name: String,
    /// Phone number, unique across all clients.
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale is paid.
///
/// Cash and mobile-money sales are paid in full at creation; installment
/// sales start at zero paid and accumulate payments over time.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Mobile-money transfer (carries a transaction reference code).
    MobileMoney,
    /// Paid over a generated installment schedule.
    Installment,
}

impl PaymentMethod {
    /// Stable string key used in report groupings and storage.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::MobileMoney => "mobile_money",
            PaymentMethod::Installment => "installment",
        }
    }

    /// Whether this method settles the full amount at creation time.
    pub const fn pays_in_full(&self) -> bool {
        matches!(self, PaymentMethod::Cash | PaymentMethod::MobileMoney)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A sale transaction: one or more line items, a payment method, and a
/// running paid amount.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    pub id: i64,
    pub client_id: i64,
    pub supplier_id: Option<i64>,
    pub payment_method: PaymentMethod,
    /// Transaction reference; present only for mobile-money sales.
    pub mobile_money_code: Option<String>,
    /// Sum of line-item subtotals at creation time.
    pub total_cents: i64,
    /// Amount paid so far. Equals total for cash/mobile-money sales;
    /// starts at zero for installment sales and grows monotonically.
    pub paid_cents: i64,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub sale_date: DateTime<Utc>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the amount paid so far as Money.
    #[inline]
    pub fn paid(&self) -> Money {
        Money::from_cents(self.paid_cents)
    }

    /// Remaining balance for installment plans.
    #[inline]
    pub fn remaining_balance(&self) -> Money {
        self.total() - self.paid()
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
/// Uses the snapshot pattern: the unit price is frozen at sale time and
/// never changes, even if the product's price later does.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    /// Quantity sold, always ≥ 1.
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// quantity × unit_price_cents.
    pub subtotal_cents: i64,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// Installment
// =============================================================================

/// One scheduled partial payment within an installment-plan sale.
///
/// The itemized schedule is tracked independently of the sale's aggregate
/// `paid_cents`: recording a payment against the sale does not mark
/// schedule rows paid. See DESIGN.md for the recorded open question.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Installment {
    pub id: i64,
    pub sale_id: i64,
    pub amount_cents: i64,
    #[ts(as = "String")]
    pub due_date: DateTime<Utc>,
    pub is_paid: bool,
    /// Set only when `is_paid` is true.
    #[ts(as = "Option<String>")]
    pub paid_date: Option<DateTime<Utc>>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Installment {
    /// Returns the installment amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Accessory Sale (daily ledger)
// =============================================================================

/// A single daily aggregate ledger row for non-cylinder accessory sales.
///
/// One row per calendar day, enforced by a UNIQUE constraint on
/// `sale_date`. Each of the eight fixed categories carries a quantity and
/// a shilling amount for that day.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct AccessorySale {
    pub id: i64,

    /// The calendar day this row aggregates. Unique.
    #[ts(as = "String")]
    pub sale_date: NaiveDate,

    pub grill_quantity: i64,
    pub grill_total_cents: i64,

    pub burner_300_quantity: i64,
    pub burner_300_total_cents: i64,
    pub burner_350_quantity: i64,
    pub burner_350_total_cents: i64,
    pub burner_450_quantity: i64,
    pub burner_450_total_cents: i64,
    pub burner_600_quantity: i64,
    pub burner_600_total_cents: i64,

    pub regulator_6kg_quantity: i64,
    pub regulator_6kg_total_cents: i64,
    pub regulator_13kg_quantity: i64,
    pub regulator_13kg_total_cents: i64,

    pub hose_quantity: i64,
    pub hose_total_cents: i64,

    pub notes: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl AccessorySale {
    /// Returns (category, quantity, amount_cents) for all eight categories
    /// in taxonomy order. Keeps report aggregation loops table-driven.
    pub fn category_totals(&self) -> [(AccessoryCategory, i64, i64); 8] {
        [
            (
                AccessoryCategory::Grill,
                self.grill_quantity,
                self.grill_total_cents,
            ),
            (
                AccessoryCategory::Burner300,
                self.burner_300_quantity,
                self.burner_300_total_cents,
            ),
            (
                AccessoryCategory::Burner350,
                self.burner_350_quantity,
                self.burner_350_total_cents,
            ),
            (
                AccessoryCategory::Burner450,
                self.burner_450_quantity,
                self.burner_450_total_cents,
            ),
            (
                AccessoryCategory::Burner600,
                self.burner_600_quantity,
                self.burner_600_total_cents,
            ),
            (
                AccessoryCategory::Regulator6Kg,
                self.regulator_6kg_quantity,
                self.regulator_6kg_total_cents,
            ),
            (
                AccessoryCategory::Regulator13Kg,
                self.regulator_13kg_quantity,
                self.regulator_13kg_total_cents,
            ),
            (
                AccessoryCategory::Hose,
                self.hose_quantity,
                self.hose_total_cents,
            ),
        ]
    }
}

/// The eight fixed accessory-ledger categories.
///
/// Burner tiers are named by their shilling price point; regulators by the
/// cylinder size they fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AccessoryCategory {
    Grill,
    Burner300,
    Burner350,
    Burner450,
    Burner600,
    Regulator6Kg,
    Regulator13Kg,
    Hose,
}

impl AccessoryCategory {
    /// All categories in ledger order.
    pub const ALL: [AccessoryCategory; 8] = [
        AccessoryCategory::Grill,
        AccessoryCategory::Burner300,
        AccessoryCategory::Burner350,
        AccessoryCategory::Burner450,
        AccessoryCategory::Burner600,
        AccessoryCategory::Regulator6Kg,
        AccessoryCategory::Regulator13Kg,
        AccessoryCategory::Hose,
    ];

    /// Stable string key used in report payloads.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AccessoryCategory::Grill => "grill",
            AccessoryCategory::Burner300 => "burner_300",
            AccessoryCategory::Burner350 => "burner_350",
            AccessoryCategory::Burner450 => "burner_450",
            AccessoryCategory::Burner600 => "burner_600",
            AccessoryCategory::Regulator6Kg => "regulator_6kg",
            AccessoryCategory::Regulator13Kg => "regulator_13kg",
            AccessoryCategory::Hose => "hose",
        }
    }
}

// =============================================================================
// Product Type Taxonomy
// =============================================================================

/// Fixed product-type buckets used by the range report's revenue
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    SixKgNew,
    SixKgRefill,
    TwelveKgNew,
    TwelveKgRefill,
    Accessories,
}

impl ProductType {
    /// All buckets in report order.
    pub const ALL: [ProductType; 5] = [
        ProductType::SixKgNew,
        ProductType::SixKgRefill,
        ProductType::TwelveKgNew,
        ProductType::TwelveKgRefill,
        ProductType::Accessories,
    ];

    /// Display label used in report payloads.
    pub const fn label(&self) -> &'static str {
        match self {
            ProductType::SixKgNew => "6Kg New",
            ProductType::SixKgRefill => "6Kg Refill",
            ProductType::TwelveKgNew => "12Kg New",
            ProductType::TwelveKgRefill => "12Kg Refill",
            ProductType::Accessories => "Accessories",
        }
    }

    /// Classifies a product by its free-text name.
    ///
    /// ## Rules (case-insensitive substring matching)
    /// ```text
    /// contains "6kg"  and "new" → SixKgNew
    /// contains "6kg"            → SixKgRefill
    /// contains "12kg" and "new" → TwelveKgNew
    /// contains "12kg"           → TwelveKgRefill
    /// otherwise                 → Accessories
    /// ```
    ///
    /// ## Fragility
    /// This is a heuristic over naming conventions, not the stored
    /// [`Product::category`] field. A product renamed without its size
    /// token silently falls into the Accessories bucket. Kept for
    /// compatibility with existing report consumers; see DESIGN.md.
    ///
    /// ## Example
    /// ```rust
    /// use bontez_core::types::ProductType;
    ///
    /// assert_eq!(
    ///     ProductType::classify("Gas Cylinder 6Kg - New"),
    ///     ProductType::SixKgNew
    /// );
    /// assert_eq!(ProductType::classify("Hose Pipe 1.5M"), ProductType::Accessories);
    /// ```
    pub fn classify(product_name: &str) -> ProductType {
        let name = product_name.to_lowercase();
        let is_new = name.contains("new");

        if name.contains("6kg") {
            if is_new {
                ProductType::SixKgNew
            } else {
                ProductType::SixKgRefill
            }
        } else if name.contains("12kg") {
            if is_new {
                ProductType::TwelveKgNew
            } else {
                ProductType::TwelveKgRefill
            }
        } else {
            ProductType::Accessories
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_keys() {
        assert_eq!(PaymentMethod::Cash.as_str(), "cash");
        assert_eq!(PaymentMethod::MobileMoney.as_str(), "mobile_money");
        assert_eq!(PaymentMethod::Installment.as_str(), "installment");
    }

    #[test]
    fn test_payment_method_pays_in_full() {
        assert!(PaymentMethod::Cash.pays_in_full());
        assert!(PaymentMethod::MobileMoney.pays_in_full());
        assert!(!PaymentMethod::Installment.pays_in_full());
    }

    #[test]
    fn test_remaining_balance() {
        let sale = Sale {
            id: 1,
            client_id: 1,
            supplier_id: None,
            payment_method: PaymentMethod::Installment,
            mobile_money_code: None,
            total_cents: 470_000,
            paid_cents: 170_000,
            notes: None,
            sale_date: Utc::now(),
            created_at: Utc::now(),
        };
        assert_eq!(sale.remaining_balance().cents(), 300_000);
    }

    #[test]
    fn test_classify_cylinders() {
        assert_eq!(
            ProductType::classify("Gas Cylinder 6Kg - New"),
            ProductType::SixKgNew
        );
        assert_eq!(
            ProductType::classify("Gas Cylinder 6Kg - Refill"),
            ProductType::SixKgRefill
        );
        assert_eq!(
            ProductType::classify("Gas Cylinder 12Kg - New"),
            ProductType::TwelveKgNew
        );
        assert_eq!(
            ProductType::classify("Gas Cylinder 12Kg - Refill"),
            ProductType::TwelveKgRefill
        );
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(
            ProductType::classify("gas cylinder 6KG - NEW"),
            ProductType::SixKgNew
        );
    }

    #[test]
    fn test_classify_accessories_fallback() {
        assert_eq!(ProductType::classify("Grill"), ProductType::Accessories);
        assert_eq!(
            ProductType::classify("Hose Pipe 1.5M"),
            ProductType::Accessories
        );
        assert_eq!(
            ProductType::classify("Burner (Ksh 450)"),
            ProductType::Accessories
        );
    }

    #[test]
    fn test_category_totals_covers_all_categories() {
        let row = AccessorySale {
            id: 1,
            sale_date: NaiveDate::from_ymd_opt(2026, 8, 8).unwrap(),
            grill_quantity: 1,
            grill_total_cents: 35_000,
            burner_300_quantity: 2,
            burner_300_total_cents: 60_000,
            burner_350_quantity: 0,
            burner_350_total_cents: 0,
            burner_450_quantity: 0,
            burner_450_total_cents: 0,
            burner_600_quantity: 1,
            burner_600_total_cents: 60_000,
            regulator_6kg_quantity: 3,
            regulator_6kg_total_cents: 150_000,
            regulator_13kg_quantity: 0,
            regulator_13kg_total_cents: 0,
            hose_quantity: 2,
            hose_total_cents: 60_000,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let totals = row.category_totals();
        assert_eq!(totals.len(), AccessoryCategory::ALL.len());
        assert_eq!(totals[0], (AccessoryCategory::Grill, 1, 35_000));
        assert_eq!(totals[7], (AccessoryCategory::Hose, 2, 60_000));
    }
}
