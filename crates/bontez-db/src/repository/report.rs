//! # Report Repository
//!
//! The read-only reporting engine: fetches row sets and hands them to the
//! pure aggregation functions in `bontez_core::report`.
//!
//! ## Reports
//! - Daily / monthly revenue breakdown by supplier (chart arrays)
//! - Comprehensive date-range report (totals, YoY, groupings, time series)
//! - Accessory-ledger aggregation over a lookback window
//! - Dashboard (lifetime stats + recent sales)
//!
//! ## Failure Semantics
//! Missing or malformed date/period inputs fall back to defaults rather
//! than failing, and empty row sets produce zero-valued aggregates. The
//! only errors surfaced here are genuine database failures.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::sale::SaleRepository;
use bontez_core::report::{
    accessory_totals, build_range_report, resolve_range, shift_back_one_year, supplier_breakdown,
    AccessoryPeriod, AccessoryReport, Dashboard, DashboardStats, LineItemRow, SaleRow,
    SalesRangeReport, SupplierBreakdown,
};
use bontez_core::AccessorySale;

/// Number of recent sales shown on the dashboard.
const DASHBOARD_RECENT_SALES: u32 = 10;

/// Read-only reporting engine over the sales and ledger tables.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    // =========================================================================
    // Supplier Breakdowns
    // =========================================================================

    /// Revenue breakdown by supplier for a single day (defaults to today).
    ///
    /// Unattributed sales land in the "Mixed Gas" bucket; colors come from
    /// each supplier's configured color.
    pub async fn daily_breakdown(&self, date: Option<NaiveDate>) -> DbResult<SupplierBreakdown> {
        let day = date.unwrap_or_else(|| Utc::now().date_naive());
        let (start, end) = day_bounds(day);

        debug!(%day, "Building daily supplier breakdown");

        let sales = self.fetch_sale_rows(start, end, None).await?;
        let colors = self.supplier_color_map().await?;

        Ok(supplier_breakdown(&sales, &colors))
    }

    /// Revenue breakdown by supplier for a calendar month (defaults to the
    /// current month; an invalid month also falls back to the current one).
    pub async fn monthly_breakdown(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> DbResult<SupplierBreakdown> {
        let today = Utc::now().date_naive();
        let year = year.unwrap_or_else(|| today.year());
        let month = month.unwrap_or_else(|| today.month());

        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
                .unwrap_or(today));
        let next_month = if first.month() == 12 {
            NaiveDate::from_ymd_opt(first.year() + 1, 1, 1).unwrap_or(first)
        } else {
            NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1).unwrap_or(first)
        };

        debug!(year = first.year(), month = first.month(), "Building monthly supplier breakdown");

        let start = first.and_time(NaiveTime::MIN).and_utc();
        let end = next_month.and_time(NaiveTime::MIN).and_utc();

        let sales = self.fetch_sale_rows(start, end, None).await?;
        let colors = self.supplier_color_map().await?;

        Ok(supplier_breakdown(&sales, &colors))
    }

    // =========================================================================
    // Comprehensive Range Report
    // =========================================================================

    /// The comprehensive sales report over a date range.
    ///
    /// `date_to` defaults to today and `date_from` to 30 days earlier; an
    /// optional supplier filter narrows the current-range figures. The
    /// year-over-year comparison always runs over all suppliers.
    pub async fn range_report(
        &self,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        supplier_id: Option<i64>,
    ) -> DbResult<SalesRangeReport> {
        let today = Utc::now().date_naive();
        let (from, to) = resolve_range(date_from, date_to, today);
        let (start, end) = range_bounds(from, to);

        debug!(%from, %to, ?supplier_id, "Building range report");

        let sales = self.fetch_sale_rows(start, end, supplier_id).await?;
        let items = self.fetch_line_items(start, end, supplier_id).await?;

        // Same calendar range, one year earlier; an invalid shift (leap
        // day) reports zero growth instead of erroring.
        let prior_revenue = match shift_back_one_year(from, to) {
            Some((prior_from, prior_to)) => {
                let (prior_start, prior_end) = range_bounds(prior_from, prior_to);
                Some(self.revenue_between(prior_start, prior_end).await?)
            }
            None => None,
        };

        Ok(build_range_report(from, to, &sales, &items, prior_revenue))
    }

    // =========================================================================
    // Accessory Report
    // =========================================================================

    /// Sums the accessory ledger over a lookback window.
    ///
    /// The period string is parsed leniently: missing means "week",
    /// unrecognized means "day". See [`AccessoryPeriod::parse`].
    pub async fn accessory_report(&self, period: Option<&str>) -> DbResult<AccessoryReport> {
        let period = AccessoryPeriod::parse(period);
        let cutoff = (Utc::now() - Duration::days(period.lookback_days())).date_naive();

        debug!(period = period.as_str(), %cutoff, "Building accessory report");

        let rows = sqlx::query_as::<_, AccessorySale>(
            r#"
            SELECT id, sale_date,
                   grill_quantity, grill_total_cents,
                   burner_300_quantity, burner_300_total_cents,
                   burner_350_quantity, burner_350_total_cents,
                   burner_450_quantity, burner_450_total_cents,
                   burner_600_quantity, burner_600_total_cents,
                   regulator_6kg_quantity, regulator_6kg_total_cents,
                   regulator_13kg_quantity, regulator_13kg_total_cents,
                   hose_quantity, hose_total_cents,
                   notes, created_at, updated_at
            FROM accessory_sales
            WHERE sale_date >= ?1
            ORDER BY sale_date
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(AccessoryReport {
            period,
            totals: accessory_totals(&rows),
        })
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    /// Lifetime stats plus the most recent sales.
    ///
    /// An empty database yields all-zero stats.
    pub async fn dashboard(&self) -> DbResult<Dashboard> {
        let total_revenue_cents: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(total_cents), 0) FROM sales")
                .fetch_one(&self.pool)
                .await?;
        let total_paid_cents: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(paid_cents), 0) FROM sales")
                .fetch_one(&self.pool)
                .await?;
        let total_clients: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await?;

        let recent_sales = SaleRepository::new(self.pool.clone())
            .list_recent(DASHBOARD_RECENT_SALES)
            .await?;

        Ok(Dashboard {
            stats: DashboardStats {
                total_revenue_cents,
                total_clients,
                total_paid_cents,
                pending_balance_cents: total_revenue_cents - total_paid_cents,
            },
            recent_sales,
        })
    }

    // =========================================================================
    // Row Fetching
    // =========================================================================

    /// Fetches sales in [start, end) joined with client/supplier names,
    /// optionally filtered by supplier.
    async fn fetch_sale_rows(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        supplier_id: Option<i64>,
    ) -> DbResult<Vec<SaleRow>> {
        let mut sql = String::from(
            r#"
            SELECT s.id, c.name AS client_name, sup.name AS supplier_name,
                   s.payment_method, s.total_cents, s.sale_date
            FROM sales s
            LEFT JOIN clients c ON c.id = s.client_id
            LEFT JOIN suppliers sup ON sup.id = s.supplier_id
            WHERE s.sale_date >= ?1 AND s.sale_date < ?2
            "#,
        );
        if supplier_id.is_some() {
            sql.push_str(" AND s.supplier_id = ?3");
        }
        sql.push_str(" ORDER BY s.sale_date, s.id");

        let mut query = sqlx::query_as::<_, SaleRow>(&sql).bind(start).bind(end);
        if let Some(id) = supplier_id {
            query = query.bind(id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Fetches line items for sales in [start, end) joined with product
    /// names, honoring the same supplier filter as the sales query.
    async fn fetch_line_items(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        supplier_id: Option<i64>,
    ) -> DbResult<Vec<LineItemRow>> {
        let mut sql = String::from(
            r#"
            SELECT p.name AS product_name, si.subtotal_cents
            FROM sale_items si
            INNER JOIN sales s ON s.id = si.sale_id
            INNER JOIN products p ON p.id = si.product_id
            WHERE s.sale_date >= ?1 AND s.sale_date < ?2
            "#,
        );
        if supplier_id.is_some() {
            sql.push_str(" AND s.supplier_id = ?3");
        }

        let mut query = sqlx::query_as::<_, LineItemRow>(&sql).bind(start).bind(end);
        if let Some(id) = supplier_id {
            query = query.bind(id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Total revenue over [start, end), all suppliers.
    async fn revenue_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(total_cents), 0) FROM sales WHERE sale_date >= ?1 AND sale_date < ?2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Supplier name → configured chart color.
    async fn supplier_color_map(&self) -> DbResult<HashMap<String, String>> {
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT name, color FROM suppliers")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().collect())
    }
}

// =============================================================================
// Date Bounds
// =============================================================================

/// Half-open datetime bounds covering one calendar day.
fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    let end = (day + Duration::days(1)).and_time(NaiveTime::MIN).and_utc();
    (start, end)
}

/// Half-open datetime bounds covering an inclusive date range.
fn range_bounds(from: NaiveDate, to: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = from.and_time(NaiveTime::MIN).and_utc();
    let end = (to + Duration::days(1)).and_time(NaiveTime::MIN).and_utc();
    (start, end)
}

// =============================================================================
// Unit Tests
// =============================================================================
