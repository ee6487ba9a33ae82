//! # Sale Repository
//!
//! Database operations for sales, their line items, and installment plans.
//!
//! ## Sale Creation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Atomic Sale Creation                                 │
//! │                                                                         │
//! │  1. VALIDATE (before any write)                                        │
//! │     └── items non-empty, quantities ≥ 1, client/products exist,        │
//! │         mobile-money reference present when required                   │
//! │                                                                         │
//! │  2. BEGIN TRANSACTION                                                  │
//! │     ├── snapshot product prices → line subtotals → sale total          │
//! │     ├── INSERT sale   (paid = total for cash/mobile-money, else 0)     │
//! │     ├── INSERT sale_items                                              │
//! │     └── INSERT installments (installment sales only, 30-day steps)     │
//! │                                                                         │
//! │  3. COMMIT (or roll back everything; no orphan rows, ever)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Payments against a sale move only the aggregate `paid_cents`; the
//! itemized installment schedule is flagged paid independently via
//! [`SaleRepository::mark_installment_paid`]. The two are intentionally
//! not reconciled (recorded open question, see DESIGN.md).

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{page_params, Page};
use bontez_core::installment::build_plan;
use bontez_core::report::SaleOverview;
use bontez_core::validation::{validate_installment_count, validate_payment, validate_quantity};
use bontez_core::{
    CoreError, Installment, Money, PaymentMethod, Product, Sale, SaleItem, ValidationError,
    DEFAULT_INSTALLMENT_COUNT,
};

// =============================================================================
// Input / Output Types
// =============================================================================

/// One (product, quantity) pair in a sale request.
#[derive(Debug, Clone)]
pub struct NewSaleItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// Input for creating a sale.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub client_id: i64,
    pub supplier_id: Option<i64>,
    pub payment_method: PaymentMethod,
    /// Transaction reference; required iff the method is mobile-money.
    pub mobile_money_code: Option<String>,
    pub items: Vec<NewSaleItem>,
    pub notes: Option<String>,
    /// Number of installments; defaults to 3. Ignored unless the payment
    /// method is installment.
    pub num_installments: Option<u32>,
    /// Defaults to now.
    pub sale_date: Option<DateTime<Utc>>,
}

/// A sale together with the rows it owns.
#[derive(Debug, Clone, Serialize)]
pub struct SaleWithDetails {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
    pub installments: Vec<Installment>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Creates a sale with its items and (for installment sales) its
    /// payment schedule, as one transaction.
    ///
    /// ## Errors
    /// * `CoreError::EmptySale` - no line items
    /// * `CoreError::ClientNotFound` / `SupplierNotFound` / `ProductNotFound`
    /// * `ValidationError` - bad quantity, missing mobile-money reference,
    ///   bad installment count
    ///
    /// Any failure rolls the transaction back; no partial rows remain.
    pub async fn create_sale(&self, input: NewSale) -> DbResult<SaleWithDetails> {
        if input.items.is_empty() {
            return Err(CoreError::EmptySale.into());
        }
        for item in &input.items {
            validate_quantity(item.quantity)?;
        }

        // Mobile-money sales carry their reference; other methods drop it.
        let mobile_money_code = match input.payment_method {
            PaymentMethod::MobileMoney => {
                let code = input
                    .mobile_money_code
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or("");
                if code.is_empty() {
                    return Err(ValidationError::Required {
                        field: "mobile_money_code".to_string(),
                    }
                    .into());
                }
                Some(code.to_string())
            }
            _ => None,
        };

        let num_installments = input.num_installments.unwrap_or(DEFAULT_INSTALLMENT_COUNT);
        if input.payment_method == PaymentMethod::Installment {
            validate_installment_count(num_installments)?;
        }

        let sale_date = input.sale_date.unwrap_or_else(Utc::now);
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        // Referenced entities must exist before anything is written.
        let client: Option<i64> = sqlx::query_scalar("SELECT id FROM clients WHERE id = ?1")
            .bind(input.client_id)
            .fetch_optional(&mut *tx)
            .await?;
        if client.is_none() {
            return Err(CoreError::ClientNotFound(input.client_id).into());
        }

        if let Some(supplier_id) = input.supplier_id {
            let supplier: Option<i64> =
                sqlx::query_scalar("SELECT id FROM suppliers WHERE id = ?1")
                    .bind(supplier_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if supplier.is_none() {
                return Err(CoreError::SupplierNotFound(supplier_id).into());
            }
        }

        // Snapshot prices and compute line subtotals.
        let mut priced_items: Vec<(Product, i64, Money)> = Vec::with_capacity(input.items.len());
        let mut total = Money::zero();
        for item in &input.items {
            let product = sqlx::query_as::<_, Product>(
                r#"
                SELECT id, name, supplier_id, category, price_cents, description, created_at
                FROM products
                WHERE id = ?1
                "#,
            )
            .bind(item.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::ProductNotFound(item.product_id))?;

            let subtotal = product.price().multiply_quantity(item.quantity);
            total += subtotal;
            priced_items.push((product, item.quantity, subtotal));
        }

        let paid = if input.payment_method.pays_in_full() {
            total
        } else {
            Money::zero()
        };

        debug!(
            client_id = input.client_id,
            method = input.payment_method.as_str(),
            total = %total,
            "Creating sale"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO sales (
                client_id, supplier_id, payment_method, mobile_money_code,
                total_cents, paid_cents, notes, sale_date, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(input.client_id)
        .bind(input.supplier_id)
        .bind(input.payment_method)
        .bind(&mobile_money_code)
        .bind(total.cents())
        .bind(paid.cents())
        .bind(&input.notes)
        .bind(sale_date)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        let sale_id = result.last_insert_rowid();

        let mut items = Vec::with_capacity(priced_items.len());
        for (product, quantity, subtotal) in &priced_items {
            let result = sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, product_id, quantity, unit_price_cents, subtotal_cents)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(sale_id)
            .bind(product.id)
            .bind(*quantity)
            .bind(product.price_cents)
            .bind(subtotal.cents())
            .execute(&mut *tx)
            .await?;

            items.push(SaleItem {
                id: result.last_insert_rowid(),
                sale_id,
                product_id: product.id,
                quantity: *quantity,
                unit_price_cents: product.price_cents,
                subtotal_cents: subtotal.cents(),
            });
        }

        let mut installments = Vec::new();
        if input.payment_method == PaymentMethod::Installment {
            let plan = build_plan(total, num_installments, sale_date)?;
            for planned in plan {
                let result = sqlx::query(
                    r#"
                    INSERT INTO installments (sale_id, amount_cents, due_date, is_paid, paid_date, created_at)
                    VALUES (?1, ?2, ?3, 0, NULL, ?4)
                    "#,
                )
                .bind(sale_id)
                .bind(planned.amount.cents())
                .bind(planned.due_date)
                .bind(now)
                .execute(&mut *tx)
                .await?;

                installments.push(Installment {
                    id: result.last_insert_rowid(),
                    sale_id,
                    amount_cents: planned.amount.cents(),
                    due_date: planned.due_date,
                    is_paid: false,
                    paid_date: None,
                    created_at: now,
                });
            }
        }

        tx.commit().await?;

        Ok(SaleWithDetails {
            sale: Sale {
                id: sale_id,
                client_id: input.client_id,
                supplier_id: input.supplier_id,
                payment_method: input.payment_method,
                mobile_money_code,
                total_cents: total.cents(),
                paid_cents: paid.cents(),
                notes: input.notes,
                sale_date,
                created_at: now,
            },
            items,
            installments,
        })
    }

    /// Records an installment payment against a sale's aggregate balance.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - sale id does not exist
    /// * `CoreError::InvalidPaymentAmount` - amount is non-positive or
    ///   exceeds the remaining balance; `paid_cents` is left unchanged
    ///
    /// ## Note
    /// Does NOT mark any [`Installment`] row paid; the itemized schedule
    /// is tracked separately via [`Self::mark_installment_paid`].
    pub async fn record_payment(&self, sale_id: i64, amount: Money) -> DbResult<Sale> {
        let mut sale = self
            .get_by_id(sale_id)
            .await?
            .ok_or_else(|| DbError::not_found("Sale", sale_id))?;

        let remaining = sale.remaining_balance();
        validate_payment(amount, remaining).map_err(|_| CoreError::InvalidPaymentAmount {
            requested: amount,
            remaining,
        })?;

        debug!(sale_id, amount = %amount, "Recording installment payment");

        sqlx::query("UPDATE sales SET paid_cents = paid_cents + ?2 WHERE id = ?1")
            .bind(sale_id)
            .bind(amount.cents())
            .execute(&self.pool)
            .await?;

        sale.paid_cents += amount.cents();
        Ok(sale)
    }

    /// Marks one installment row of the itemized schedule as paid.
    ///
    /// Sets `is_paid` and `paid_date`; does NOT touch the owning sale's
    /// aggregate `paid_cents`.
    pub async fn mark_installment_paid(&self, installment_id: i64) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE installments
            SET is_paid = 1, paid_date = ?2
            WHERE id = ?1 AND is_paid = 0
            "#,
        )
        .bind(installment_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Installment (unpaid)", installment_id));
        }

        Ok(())
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, client_id, supplier_id, payment_method, mobile_money_code,
                   total_cents, paid_cents, notes, sale_date, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets a sale with its items and installments.
    pub async fn get_with_details(&self, id: i64) -> DbResult<SaleWithDetails> {
        let sale = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Sale", id))?;

        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, quantity, unit_price_cents, subtotal_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let installments = sqlx::query_as::<_, Installment>(
            r#"
            SELECT id, sale_id, amount_cents, due_date, is_paid, paid_date, created_at
            FROM installments
            WHERE sale_id = ?1
            ORDER BY due_date
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(SaleWithDetails {
            sale,
            items,
            installments,
        })
    }

    /// Lists sales with client/supplier display fields, newest first.
    pub async fn list(&self, page: u32, limit: u32) -> DbResult<Page<SaleOverview>> {
        let (page, limit, offset) = page_params(page, limit);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        let sales = sqlx::query_as::<_, SaleOverview>(
            r#"
            SELECT s.id, s.client_id, c.name AS client_name,
                   s.supplier_id, sup.name AS supplier_name,
                   s.payment_method, s.total_cents, s.paid_cents,
                   s.sale_date, s.created_at
            FROM sales s
            LEFT JOIN clients c ON c.id = s.client_id
            LEFT JOIN suppliers sup ON sup.id = s.supplier_id
            ORDER BY s.created_at DESC, s.id DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(sales, total, page, limit))
    }

    /// Returns the most recent sales (dashboard section).
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<SaleOverview>> {
        let sales = sqlx::query_as::<_, SaleOverview>(
            r#"
            SELECT s.id, s.client_id, c.name AS client_name,
                   s.supplier_id, sup.name AS supplier_name,
                   s.payment_method, s.total_cents, s.paid_cents,
                   s.sale_date, s.created_at
            FROM sales s
            LEFT JOIN clients c ON c.id = s.client_id
            LEFT JOIN suppliers sup ON sup.id = s.supplier_id
            ORDER BY s.created_at DESC, s.id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists a client's sales history, newest first.
    pub async fn list_for_client(&self, client_id: i64) -> DbResult<Vec<SaleOverview>> {
        let sales = sqlx::query_as::<_, SaleOverview>(
            r#"
            SELECT s.id, s.client_id, c.name AS client_name,
                   s.supplier_id, sup.name AS supplier_name,
                   s.payment_method, s.total_cents, s.paid_cents,
                   s.sale_date, s.created_at
            FROM sales s
            LEFT JOIN clients c ON c.id = s.client_id
            LEFT JOIN suppliers sup ON sup.id = s.supplier_id
            WHERE s.client_id = ?1
            ORDER BY s.created_at DESC, s.id DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Counts sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
