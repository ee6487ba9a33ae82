//! # Report Shapes and Aggregation
//!
//! Output shapes for every report plus the pure functions that build them
//! from fetched row sets.
//!
//! ## Division of Labor
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Reporting Data Flow                                 │
//! │                                                                         │
//! │  bontez-db ReportRepository                                            │
//! │  ├── fetches sales in range (joined with client/supplier names)        │
//! │  ├── fetches line items in range (joined with product names)           │
//! │  ├── fetches the supplier color map                                    │
//! │  └── fetches prior-year revenue scalar                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  THIS MODULE (pure, no I/O)                                            │
//! │  ├── supplier_breakdown()  → labels / data / colors arrays             │
//! │  ├── build_range_report()  → totals, YoY, groupings, time series       │
//! │  └── accessory_totals()    → per-category sums                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Serializable report records for the presentation layer                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Aggregation walks the fetched rows in memory rather than pushing
//! GROUP BY into SQL; row counts are small (a single shop's sales) and the
//! first-seen grouping order the charts rely on falls out naturally.
//!
//! ## Failure Semantics
//! Report inputs never fail the request: malformed dates and periods fall
//! back to defaults via [`parse_date_or`] and [`AccessoryPeriod::parse`],
//! and empty row sets produce zero-valued aggregates.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{AccessoryCategory, AccessorySale, PaymentMethod, ProductType};
use crate::{
    DEFAULT_REPORT_WINDOW_DAYS, FALLBACK_COLOR, MIXED_GAS_COLOR, MIXED_GAS_LABEL,
    TOP_CLIENTS_LIMIT,
};

// =============================================================================
// Fetched Row Types
// =============================================================================

/// A sale row as fetched for reporting, joined with display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleRow {
    pub id: i64,
    /// Client display name; None if the join found nothing.
    pub client_name: Option<String>,
    /// Supplier display name; None for unattributed ("mixed gas") sales.
    pub supplier_name: Option<String>,
    pub payment_method: PaymentMethod,
    pub total_cents: i64,
    pub sale_date: chrono::DateTime<chrono::Utc>,
}

/// A line item row as fetched for reporting, joined with its product name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LineItemRow {
    pub product_name: String,
    pub subtotal_cents: i64,
}

/// A sale joined with client/supplier display fields, used by sale
/// listings and the dashboard's recent-sales section.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleOverview {
    pub id: i64,
    pub client_id: i64,
    pub client_name: Option<String>,
    pub supplier_id: Option<i64>,
    pub supplier_name: Option<String>,
    pub payment_method: PaymentMethod,
    pub total_cents: i64,
    pub paid_cents: i64,
    #[ts(as = "String")]
    pub sale_date: chrono::DateTime<chrono::Utc>,
    #[ts(as = "String")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// =============================================================================
// Supplier Breakdown (daily / monthly charts)
// =============================================================================

/// Parallel label/value/color arrays for the supplier pie/bar charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SupplierBreakdown {
    pub labels: Vec<String>,
    /// Revenue per label, in cents.
    pub data: Vec<i64>,
    pub colors: Vec<String>,
}

/// Groups sales by supplier name and sums revenue per group.
///
/// Sales with no supplier land in the synthetic "Mixed Gas" bucket. Label
/// order is first-seen order over the scanned sales. Colors come from the
/// supplier color map; "Mixed Gas" is purple and unmapped labels fall back
/// to gray.
pub fn supplier_breakdown(
    sales: &[SaleRow],
    supplier_colors: &HashMap<String, String>,
) -> SupplierBreakdown {
    let mut labels: Vec<String> = Vec::new();
    let mut totals: HashMap<String, i64> = HashMap::new();

    for sale in sales {
        let label = sale
            .supplier_name
            .clone()
            .unwrap_or_else(|| MIXED_GAS_LABEL.to_string());

        if !totals.contains_key(&label) {
            labels.push(label.clone());
        }
        *totals.entry(label).or_insert(0) += sale.total_cents;
    }

    let data = labels.iter().map(|l| totals[l]).collect();
    let colors = labels
        .iter()
        .map(|label| {
            if label == MIXED_GAS_LABEL {
                MIXED_GAS_COLOR.to_string()
            } else {
                supplier_colors
                    .get(label)
                    .cloned()
                    .unwrap_or_else(|| FALLBACK_COLOR.to_string())
            }
        })
        .collect();

    SupplierBreakdown {
        labels,
        data,
        colors,
    }
}

// =============================================================================
// Comprehensive Range Report
// =============================================================================

/// One label/revenue pair within a report grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RevenueEntry {
    pub label: String,
    pub total_cents: i64,
}

/// One day of the range report's time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailySales {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub revenue_cents: i64,
    pub sale_count: u64,
}

/// The comprehensive date-range sales report.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesRangeReport {
    #[ts(as = "String")]
    pub date_from: NaiveDate,
    #[ts(as = "String")]
    pub date_to: NaiveDate,

    pub total_sales: u64,
    pub total_revenue_cents: i64,
    /// Zero when `total_sales` is zero, never a division error.
    pub average_sale_cents: i64,
    /// Percent growth vs the same calendar range one year earlier.
    /// Zero when prior-year revenue is zero or the shifted range is
    /// invalid (leap-day edge).
    pub yoy_growth_pct: f64,

    /// Revenue per attributed supplier, first-seen order.
    pub by_supplier: Vec<RevenueEntry>,
    /// Revenue per payment method, first-seen order.
    pub by_payment_method: Vec<RevenueEntry>,
    /// Revenue per product-type bucket, fixed taxonomy order.
    pub by_product_type: Vec<RevenueEntry>,

    /// Chronological daily (date, revenue, count) series.
    pub daily_sales: Vec<DailySales>,
    /// Top clients by revenue, descending; ties keep first-seen order.
    pub top_clients: Vec<RevenueEntry>,
}

/// Builds the comprehensive range report from fetched rows.
///
/// ## Arguments
/// * `date_from` / `date_to` - the resolved (defaulted) range bounds
/// * `sales` - all sales in the range (already supplier-filtered if a
///   supplier filter was given)
/// * `items` - all line items belonging to those sales, with product names
/// * `prior_year_revenue_cents` - revenue over the range shifted back one
///   year; `None` when the shift was invalid (see [`shift_back_one_year`])
pub fn build_range_report(
    date_from: NaiveDate,
    date_to: NaiveDate,
    sales: &[SaleRow],
    items: &[LineItemRow],
    prior_year_revenue_cents: Option<i64>,
) -> SalesRangeReport {
    let total_sales = sales.len() as u64;
    let total_revenue_cents: i64 = sales.iter().map(|s| s.total_cents).sum();

    let average_sale_cents = if total_sales == 0 {
        0
    } else {
        total_revenue_cents / total_sales as i64
    };

    // YoY growth: 0 when the prior year had no revenue (or no valid range),
    // never infinite/undefined.
    let yoy_growth_pct = match prior_year_revenue_cents {
        Some(prior) if prior > 0 => {
            (total_revenue_cents - prior) as f64 / prior as f64 * 100.0
        }
        _ => 0.0,
    };

    // Revenue by supplier (attributed sales only), first-seen order.
    let mut by_supplier: Vec<RevenueEntry> = Vec::new();
    for sale in sales {
        if let Some(name) = &sale.supplier_name {
            accumulate(&mut by_supplier, name, sale.total_cents);
        }
    }

    // Revenue by payment method, first-seen order.
    let mut by_payment_method: Vec<RevenueEntry> = Vec::new();
    for sale in sales {
        accumulate(
            &mut by_payment_method,
            sale.payment_method.as_str(),
            sale.total_cents,
        );
    }

    // Revenue by product type: every bucket present even when zero.
    let mut type_totals: HashMap<ProductType, i64> = HashMap::new();
    for item in items {
        *type_totals
            .entry(ProductType::classify(&item.product_name))
            .or_insert(0) += item.subtotal_cents;
    }
    let by_product_type = ProductType::ALL
        .iter()
        .map(|ty| RevenueEntry {
            label: ty.label().to_string(),
            total_cents: type_totals.get(ty).copied().unwrap_or(0),
        })
        .collect();

    // Daily time series; BTreeMap keeps it chronological.
    let mut daily: BTreeMap<NaiveDate, (i64, u64)> = BTreeMap::new();
    for sale in sales {
        let day = daily.entry(sale.sale_date.date_naive()).or_insert((0, 0));
        day.0 += sale.total_cents;
        day.1 += 1;
    }
    let daily_sales = daily
        .into_iter()
        .map(|(date, (revenue_cents, sale_count))| DailySales {
            date,
            revenue_cents,
            sale_count,
        })
        .collect();

    // Top clients: accumulate in first-seen order, then stable-sort by
    // revenue so ties keep that order.
    let mut client_totals: Vec<RevenueEntry> = Vec::new();
    for sale in sales {
        if let Some(name) = &sale.client_name {
            accumulate(&mut client_totals, name, sale.total_cents);
        }
    }
    client_totals.sort_by(|a, b| b.total_cents.cmp(&a.total_cents));
    client_totals.truncate(TOP_CLIENTS_LIMIT);

    SalesRangeReport {
        date_from,
        date_to,
        total_sales,
        total_revenue_cents,
        average_sale_cents,
        yoy_growth_pct,
        by_supplier,
        by_payment_method,
        by_product_type,
        daily_sales,
        top_clients: client_totals,
    }
}

/// Adds `amount` to the entry with the given label, creating it at the end
/// of the list on first sight.
fn accumulate(entries: &mut Vec<RevenueEntry>, label: &str, amount: i64) {
    match entries.iter_mut().find(|e| e.label == label) {
        Some(entry) => entry.total_cents += amount,
        None => entries.push(RevenueEntry {
            label: label.to_string(),
            total_cents: amount,
        }),
    }
}

// =============================================================================
// Range Resolution Helpers
// =============================================================================

/// Resolves optional report bounds to a concrete range.
///
/// `date_to` defaults to today; `date_from` defaults to 30 days before
/// `date_to`.
pub fn resolve_range(
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    today: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    let to = date_to.unwrap_or(today);
    let from = date_from.unwrap_or(to - Duration::days(DEFAULT_REPORT_WINDOW_DAYS));
    (from, to)
}

/// Parses a `YYYY-MM-DD` date parameter, falling back instead of failing.
///
/// Missing and malformed inputs both yield the fallback; report requests
/// never error on bad date parameters.
pub fn parse_date_or(input: Option<&str>, fallback: NaiveDate) -> NaiveDate {
    input
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .unwrap_or(fallback)
}

/// Shifts a date range back exactly one calendar year.
///
/// Returns `None` when either bound has no valid counterpart in the prior
/// year (Feb 29 outside a leap year), in which case YoY growth reports as
/// zero rather than raising an error.
pub fn shift_back_one_year(
    from: NaiveDate,
    to: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    let from = from.with_year(from.year() - 1)?;
    let to = to.with_year(to.year() - 1)?;
    Some((from, to))
}

// =============================================================================
// Accessory Report
// =============================================================================

/// Lookback period for the accessory aggregation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AccessoryPeriod {
    Day,
    Week,
    Month,
}

impl AccessoryPeriod {
    /// Days of ledger history this period covers.
    pub const fn lookback_days(&self) -> i64 {
        match self {
            AccessoryPeriod::Day => 1,
            AccessoryPeriod::Week => 7,
            AccessoryPeriod::Month => 30,
        }
    }

    /// Parses a period parameter, defaulting instead of failing.
    ///
    /// Missing input means the standard weekly report; an unrecognized
    /// value falls through to the one-day window.
    pub fn parse(input: Option<&str>) -> Self {
        match input {
            None => AccessoryPeriod::Week,
            Some(s) => match s.trim() {
                "week" => AccessoryPeriod::Week,
                "month" => AccessoryPeriod::Month,
                _ => AccessoryPeriod::Day,
            },
        }
    }

    /// Stable string key used in report payloads.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AccessoryPeriod::Day => "day",
            AccessoryPeriod::Week => "week",
            AccessoryPeriod::Month => "month",
        }
    }
}

/// Summed quantity and amount for one accessory category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryTotal {
    pub category: AccessoryCategory,
    pub quantity: i64,
    pub amount_cents: i64,
}

/// The accessory aggregation report over a lookback window.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AccessoryReport {
    pub period: AccessoryPeriod,
    /// All eight categories in ledger order, zero-valued when absent.
    pub totals: Vec<CategoryTotal>,
}

/// Sums each category's quantity and amount across daily ledger rows.
pub fn accessory_totals(rows: &[AccessorySale]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = AccessoryCategory::ALL
        .iter()
        .map(|&category| CategoryTotal {
            category,
            quantity: 0,
            amount_cents: 0,
        })
        .collect();

    for row in rows {
        for (i, (_, quantity, amount_cents)) in row.category_totals().iter().enumerate() {
            totals[i].quantity += quantity;
            totals[i].amount_cents += amount_cents;
        }
    }

    totals
}

// =============================================================================
// Dashboard
// =============================================================================

/// Lifetime aggregate stats shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardStats {
    pub total_revenue_cents: i64,
    pub total_clients: i64,
    pub total_paid_cents: i64,
    /// total_revenue − total_paid.
    pub pending_balance_cents: i64,
}

/// The dashboard payload: stats plus the most recent sales.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_sales: Vec<SaleOverview>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sale(
        id: i64,
        client: Option<&str>,
        supplier: Option<&str>,
        method: PaymentMethod,
        total_cents: i64,
        date: NaiveDate,
    ) -> SaleRow {
        SaleRow {
            id,
            client_name: client.map(String::from),
            supplier_name: supplier.map(String::from),
            payment_method: method,
            total_cents,
            sale_date: Utc
                .with_ymd_and_hms(date.year(), date.month(), date.day(), 10, 0, 0)
                .unwrap(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[test]
    fn test_supplier_breakdown_with_mixed_gas_bucket() {
        let sales = vec![
            sale(1, None, Some("Top Gas"), PaymentMethod::Cash, 320_000, day(1)),
            sale(2, None, None, PaymentMethod::Cash, 100_000, day(1)),
            sale(3, None, Some("Top Gas"), PaymentMethod::Cash, 50_000, day(1)),
            sale(4, None, Some("K-Gas"), PaymentMethod::Cash, 75_000, day(1)),
        ];

        let mut colors = HashMap::new();
        colors.insert("Top Gas".to_string(), "red".to_string());

        let breakdown = supplier_breakdown(&sales, &colors);

        assert_eq!(breakdown.labels, vec!["Top Gas", "Mixed Gas", "K-Gas"]);
        assert_eq!(breakdown.data, vec![370_000, 100_000, 75_000]);
        // Mapped color, purple for Mixed Gas, gray fallback for K-Gas
        assert_eq!(breakdown.colors, vec!["red", "purple", "gray"]);
    }

    #[test]
    fn test_supplier_breakdown_empty() {
        let breakdown = supplier_breakdown(&[], &HashMap::new());
        assert!(breakdown.labels.is_empty());
        assert!(breakdown.data.is_empty());
        assert!(breakdown.colors.is_empty());
    }

    /// Spec scenario: three sales of 100, 200, 300 for one supplier.
    #[test]
    fn test_range_report_totals_and_average() {
        let sales = vec![
            sale(1, Some("A"), Some("Top Gas"), PaymentMethod::Cash, 100, day(1)),
            sale(2, Some("B"), Some("Top Gas"), PaymentMethod::Cash, 200, day(2)),
            sale(3, Some("C"), Some("Top Gas"), PaymentMethod::Cash, 300, day(3)),
        ];

        let report = build_range_report(day(1), day(5), &sales, &[], Some(0));

        assert_eq!(report.total_sales, 3);
        assert_eq!(report.total_revenue_cents, 600);
        assert_eq!(report.average_sale_cents, 200);
        assert_eq!(report.by_supplier.len(), 1);
        assert_eq!(report.by_supplier[0].label, "Top Gas");
        assert_eq!(report.by_supplier[0].total_cents, 600);
    }

    #[test]
    fn test_range_report_empty_is_all_zero() {
        let report = build_range_report(day(1), day(5), &[], &[], None);

        assert_eq!(report.total_sales, 0);
        assert_eq!(report.total_revenue_cents, 0);
        assert_eq!(report.average_sale_cents, 0);
        assert_eq!(report.yoy_growth_pct, 0.0);
        assert!(report.by_supplier.is_empty());
        assert!(report.daily_sales.is_empty());
        assert!(report.top_clients.is_empty());
        // Product-type buckets are always present
        assert_eq!(report.by_product_type.len(), 5);
        assert!(report.by_product_type.iter().all(|e| e.total_cents == 0));
    }

    #[test]
    fn test_yoy_growth_zero_when_prior_year_empty() {
        let sales = vec![sale(
            1,
            Some("A"),
            None,
            PaymentMethod::Cash,
            500_000,
            day(1),
        )];

        // Prior revenue zero → growth zero regardless of current revenue
        let report = build_range_report(day(1), day(5), &sales, &[], Some(0));
        assert_eq!(report.yoy_growth_pct, 0.0);

        // Invalid prior range → growth zero
        let report = build_range_report(day(1), day(5), &sales, &[], None);
        assert_eq!(report.yoy_growth_pct, 0.0);
    }

    #[test]
    fn test_yoy_growth_positive() {
        let sales = vec![sale(
            1,
            Some("A"),
            None,
            PaymentMethod::Cash,
            300,
            day(1),
        )];

        let report = build_range_report(day(1), day(5), &sales, &[], Some(200));
        assert!((report.yoy_growth_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_payment_method_grouping() {
        let sales = vec![
            sale(1, None, None, PaymentMethod::Cash, 100, day(1)),
            sale(2, None, None, PaymentMethod::Installment, 200, day(1)),
            sale(3, None, None, PaymentMethod::Cash, 300, day(1)),
        ];

        let report = build_range_report(day(1), day(5), &sales, &[], Some(0));

        assert_eq!(report.by_payment_method.len(), 2);
        assert_eq!(report.by_payment_method[0].label, "cash");
        assert_eq!(report.by_payment_method[0].total_cents, 400);
        assert_eq!(report.by_payment_method[1].label, "installment");
        assert_eq!(report.by_payment_method[1].total_cents, 200);
    }

    #[test]
    fn test_product_type_buckets() {
        let items = vec![
            LineItemRow {
                product_name: "Gas Cylinder 6Kg - New".to_string(),
                subtotal_cents: 320_000,
            },
            LineItemRow {
                product_name: "Gas Cylinder 6Kg - Refill".to_string(),
                subtotal_cents: 120_000,
            },
            LineItemRow {
                product_name: "Gas Cylinder 12Kg - Refill".to_string(),
                subtotal_cents: 260_000,
            },
            LineItemRow {
                product_name: "Hose Pipe 1.5M".to_string(),
                subtotal_cents: 30_000,
            },
        ];

        let report = build_range_report(day(1), day(5), &[], &items, Some(0));

        let get = |label: &str| {
            report
                .by_product_type
                .iter()
                .find(|e| e.label == label)
                .unwrap()
                .total_cents
        };
        assert_eq!(get("6Kg New"), 320_000);
        assert_eq!(get("6Kg Refill"), 120_000);
        assert_eq!(get("12Kg New"), 0);
        assert_eq!(get("12Kg Refill"), 260_000);
        assert_eq!(get("Accessories"), 30_000);
    }

    #[test]
    fn test_daily_series_sorted_chronologically() {
        let sales = vec![
            sale(1, None, None, PaymentMethod::Cash, 300, day(3)),
            sale(2, None, None, PaymentMethod::Cash, 100, day(1)),
            sale(3, None, None, PaymentMethod::Cash, 200, day(1)),
        ];

        let report = build_range_report(day(1), day(5), &sales, &[], Some(0));

        assert_eq!(report.daily_sales.len(), 2);
        assert_eq!(report.daily_sales[0].date, day(1));
        assert_eq!(report.daily_sales[0].revenue_cents, 300);
        assert_eq!(report.daily_sales[0].sale_count, 2);
        assert_eq!(report.daily_sales[1].date, day(3));
        assert_eq!(report.daily_sales[1].revenue_cents, 300);
        assert_eq!(report.daily_sales[1].sale_count, 1);
    }

    #[test]
    fn test_top_clients_ties_keep_first_seen_order() {
        let sales = vec![
            sale(1, Some("Mary"), None, PaymentMethod::Cash, 100, day(1)),
            sale(2, Some("John"), None, PaymentMethod::Cash, 100, day(1)),
            sale(3, Some("Alice"), None, PaymentMethod::Cash, 500, day(1)),
        ];

        let report = build_range_report(day(1), day(5), &sales, &[], Some(0));

        assert_eq!(report.top_clients[0].label, "Alice");
        // Mary and John tie at 100; Mary was seen first
        assert_eq!(report.top_clients[1].label, "Mary");
        assert_eq!(report.top_clients[2].label, "John");
    }

    #[test]
    fn test_top_clients_capped_at_ten() {
        let sales: Vec<SaleRow> = (0..15)
            .map(|i| {
                sale(
                    i,
                    Some(&format!("client-{i}")),
                    None,
                    PaymentMethod::Cash,
                    100 * (i + 1),
                    day(1),
                )
            })
            .collect();

        let report = build_range_report(day(1), day(5), &sales, &[], Some(0));
        assert_eq!(report.top_clients.len(), 10);
    }

    #[test]
    fn test_resolve_range_defaults() {
        let today = day(8);

        let (from, to) = resolve_range(None, None, today);
        assert_eq!(to, today);
        assert_eq!(from, today - Duration::days(30));

        let (from, to) = resolve_range(Some(day(1)), Some(day(5)), today);
        assert_eq!(from, day(1));
        assert_eq!(to, day(5));
    }

    #[test]
    fn test_parse_date_or_fallback() {
        let fallback = day(8);

        assert_eq!(parse_date_or(Some("2026-08-01"), fallback), day(1));
        assert_eq!(parse_date_or(Some(" 2026-08-01 "), fallback), day(1));
        assert_eq!(parse_date_or(Some("not-a-date"), fallback), fallback);
        assert_eq!(parse_date_or(Some("2026-13-40"), fallback), fallback);
        assert_eq!(parse_date_or(None, fallback), fallback);
    }

    #[test]
    fn test_shift_back_one_year() {
        let shifted = shift_back_one_year(day(1), day(8)).unwrap();
        assert_eq!(shifted.0, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap());
        assert_eq!(shifted.1, NaiveDate::from_ymd_opt(2025, 8, 8).unwrap());
    }

    #[test]
    fn test_shift_back_one_year_leap_day() {
        // 2024-02-29 has no counterpart in 2023
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert!(shift_back_one_year(leap, leap).is_none());
    }

    #[test]
    fn test_accessory_period_parse() {
        assert_eq!(AccessoryPeriod::parse(None), AccessoryPeriod::Week);
        assert_eq!(AccessoryPeriod::parse(Some("week")), AccessoryPeriod::Week);
        assert_eq!(AccessoryPeriod::parse(Some("month")), AccessoryPeriod::Month);
        assert_eq!(AccessoryPeriod::parse(Some("day")), AccessoryPeriod::Day);
        assert_eq!(AccessoryPeriod::parse(Some("bogus")), AccessoryPeriod::Day);
    }

    #[test]
    fn test_accessory_period_lookback() {
        assert_eq!(AccessoryPeriod::Day.lookback_days(), 1);
        assert_eq!(AccessoryPeriod::Week.lookback_days(), 7);
        assert_eq!(AccessoryPeriod::Month.lookback_days(), 30);
    }

    #[test]
    fn test_accessory_totals_sums_across_rows() {
        use chrono::Utc;

        let base = AccessorySale {
            id: 1,
            sale_date: day(1),
            grill_quantity: 1,
            grill_total_cents: 35_000,
            burner_300_quantity: 2,
            burner_300_total_cents: 60_000,
            burner_350_quantity: 0,
            burner_350_total_cents: 0,
            burner_450_quantity: 0,
            burner_450_total_cents: 0,
            burner_600_quantity: 0,
            burner_600_total_cents: 0,
            regulator_6kg_quantity: 1,
            regulator_6kg_total_cents: 50_000,
            regulator_13kg_quantity: 0,
            regulator_13kg_total_cents: 0,
            hose_quantity: 0,
            hose_total_cents: 0,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let mut second = base.clone();
        second.id = 2;
        second.sale_date = day(2);
        second.grill_quantity = 2;
        second.grill_total_cents = 70_000;

        let totals = accessory_totals(&[base, second]);

        assert_eq!(totals.len(), 8);
        assert_eq!(totals[0].category, AccessoryCategory::Grill);
        assert_eq!(totals[0].quantity, 3);
        assert_eq!(totals[0].amount_cents, 105_000);
        assert_eq!(totals[1].quantity, 4);
        // Untouched categories stay zero
        assert_eq!(totals[7].quantity, 0);
        assert_eq!(totals[7].amount_cents, 0);
    }

    #[test]
    fn test_accessory_totals_empty_window() {
        let totals = accessory_totals(&[]);
        assert_eq!(totals.len(), 8);
        assert!(totals.iter().all(|t| t.quantity == 0 && t.amount_cents == 0));
    }
}
