//! # Accessory Ledger Repository
//!
//! Database operations for the daily accessory-sales ledger.
//!
//! One row per calendar day: a second create for an existing day is
//! rejected with a duplicate error, and callers route to
//! [`AccessoryRepository::update`] instead (the "today" workflow looks the
//! day up first via [`AccessoryRepository::get_by_day`]). The UNIQUE
//! constraint on `sale_date` backstops the pre-check.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{page_params, Page};
use bontez_core::AccessorySale;

/// Input for creating or updating a daily ledger row.
///
/// Quantities and amounts default to zero for categories not sold that
/// day, mirroring the entry form.
#[derive(Debug, Clone, Default)]
pub struct AccessorySaleInput {
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
}

/// Repository for the daily accessory ledger.
#[derive(Debug, Clone)]
pub struct AccessoryRepository {
    pool: SqlitePool,
}

impl AccessoryRepository {
    /// Creates a new AccessoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AccessoryRepository { pool }
    }

    /// Creates the ledger row for a calendar day.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - the day already has a row; update it
    ///   instead
    pub async fn create(
        &self,
        sale_date: NaiveDate,
        input: AccessorySaleInput,
    ) -> DbResult<AccessorySale> {
        debug!(date = %sale_date, "Creating accessory ledger row");

        if self.get_by_day(sale_date).await?.is_some() {
            return Err(DbError::duplicate("accessory sale date", sale_date.to_string()));
        }

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO accessory_sales (
                sale_date,
                grill_quantity, grill_total_cents,
                burner_300_quantity, burner_300_total_cents,
                burner_350_quantity, burner_350_total_cents,
                burner_450_quantity, burner_450_total_cents,
                burner_600_quantity, burner_600_total_cents,
                regulator_6kg_quantity, regulator_6kg_total_cents,
                regulator_13kg_quantity, regulator_13kg_total_cents,
                hose_quantity, hose_total_cents,
                notes, created_at, updated_at
            ) VALUES (
                ?1,
                ?2, ?3,
                ?4, ?5,
                ?6, ?7,
                ?8, ?9,
                ?10, ?11,
                ?12, ?13,
                ?14, ?15,
                ?16, ?17,
                ?18, ?19, ?20
            )
            "#,
        )
        .bind(sale_date)
        .bind(input.grill_quantity)
        .bind(input.grill_total_cents)
        .bind(input.burner_300_quantity)
        .bind(input.burner_300_total_cents)
        .bind(input.burner_350_quantity)
        .bind(input.burner_350_total_cents)
        .bind(input.burner_450_quantity)
        .bind(input.burner_450_total_cents)
        .bind(input.burner_600_quantity)
        .bind(input.burner_600_total_cents)
        .bind(input.regulator_6kg_quantity)
        .bind(input.regulator_6kg_total_cents)
        .bind(input.regulator_13kg_quantity)
        .bind(input.regulator_13kg_total_cents)
        .bind(input.hose_quantity)
        .bind(input.hose_total_cents)
        .bind(&input.notes)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(assemble(result.last_insert_rowid(), sale_date, input, now, now))
    }

    /// Replaces a day's figures in place and bumps `updated_at`.
    pub async fn update(&self, id: i64, input: AccessorySaleInput) -> DbResult<()> {
        debug!(id, "Updating accessory ledger row");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE accessory_sales SET
                grill_quantity = ?2, grill_total_cents = ?3,
                burner_300_quantity = ?4, burner_300_total_cents = ?5,
                burner_350_quantity = ?6, burner_350_total_cents = ?7,
                burner_450_quantity = ?8, burner_450_total_cents = ?9,
                burner_600_quantity = ?10, burner_600_total_cents = ?11,
                regulator_6kg_quantity = ?12, regulator_6kg_total_cents = ?13,
                regulator_13kg_quantity = ?14, regulator_13kg_total_cents = ?15,
                hose_quantity = ?16, hose_total_cents = ?17,
                notes = ?18, updated_at = ?19
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(input.grill_quantity)
        .bind(input.grill_total_cents)
        .bind(input.burner_300_quantity)
        .bind(input.burner_300_total_cents)
        .bind(input.burner_350_quantity)
        .bind(input.burner_350_total_cents)
        .bind(input.burner_450_quantity)
        .bind(input.burner_450_total_cents)
        .bind(input.burner_600_quantity)
        .bind(input.burner_600_total_cents)
        .bind(input.regulator_6kg_quantity)
        .bind(input.regulator_6kg_total_cents)
        .bind(input.regulator_13kg_quantity)
        .bind(input.regulator_13kg_total_cents)
        .bind(input.hose_quantity)
        .bind(input.hose_total_cents)
        .bind(&input.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("AccessorySale", id));
        }

        Ok(())
    }

    /// Gets a ledger row by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<AccessorySale>> {
        let row = sqlx::query_as::<_, AccessorySale>(
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
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Gets the ledger row for a calendar day, if one exists.
    ///
    /// The "today" workflow: look the day up, then edit it or create it.
    pub async fn get_by_day(&self, day: NaiveDate) -> DbResult<Option<AccessorySale>> {
        let row = sqlx::query_as::<_, AccessorySale>(
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
            WHERE sale_date = ?1
            "#,
        )
        .bind(day)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Lists ledger rows, newest day first, paginated.
    pub async fn list(&self, page: u32, limit: u32) -> DbResult<Page<AccessorySale>> {
        let (page, limit, offset) = page_params(page, limit);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accessory_sales")
            .fetch_one(&self.pool)
            .await?;

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
            ORDER BY sale_date DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(rows, total, page, limit))
    }
}

fn assemble(
    id: i64,
    sale_date: NaiveDate,
    input: AccessorySaleInput,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
) -> AccessorySale {
    AccessorySale {
        id,
        sale_date,
        grill_quantity: input.grill_quantity,
        grill_total_cents: input.grill_total_cents,
        burner_300_quantity: input.burner_300_quantity,
        burner_300_total_cents: input.burner_300_total_cents,
        burner_350_quantity: input.burner_350_quantity,
        burner_350_total_cents: input.burner_350_total_cents,
        burner_450_quantity: input.burner_450_quantity,
        burner_450_total_cents: input.burner_450_total_cents,
        burner_600_quantity: input.burner_600_quantity,
        burner_600_total_cents: input.burner_600_total_cents,
        regulator_6kg_quantity: input.regulator_6kg_quantity,
        regulator_6kg_total_cents: input.regulator_6kg_total_cents,
        regulator_13kg_quantity: input.regulator_13kg_quantity,
        regulator_13kg_total_cents: input.regulator_13kg_total_cents,
        hose_quantity: input.hose_quantity,
        hose_total_cents: input.hose_total_cents,
        notes: input.notes,
        created_at,
        updated_at,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::AccessorySaleInput;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn entry() -> AccessorySaleInput {
        AccessorySaleInput {
            grill_quantity: 1,
            grill_total_cents: 35_000,
            burner_450_quantity: 2,
            burner_450_total_cents: 90_000,
            hose_quantity: 1,
            hose_total_cents: 30_000,
            notes: Some("busy market day".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_fetch_by_day() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let created = db.accessories().create(day(8), entry()).await.unwrap();
        assert_eq!(created.sale_date, day(8));
        assert_eq!(created.burner_450_quantity, 2);

        let fetched = db.accessories().get_by_day(day(8)).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.notes.as_deref(), Some("busy market day"));

        assert!(db.accessories().get_by_day(day(9)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_second_row_for_same_day_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.accessories().create(day(8), entry()).await.unwrap();
        let err = db
            .accessories()
            .create(day(8), AccessorySaleInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        // Still exactly one row for the day
        let page = db.accessories().list(1, 20).await.unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_update_in_place_bumps_updated_at() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let created = db.accessories().create(day(8), entry()).await.unwrap();

        let mut revised = entry();
        revised.grill_quantity = 4;
        revised.grill_total_cents = 140_000;
        db.accessories().update(created.id, revised).await.unwrap();

        let fetched = db
            .accessories()
            .get_by_id(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.grill_quantity, 4);
        assert_eq!(fetched.grill_total_cents, 140_000);
        assert!(fetched.updated_at >= fetched.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .accessories()
            .update(999, AccessorySaleInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_newest_day_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.accessories()
            .create(day(5), AccessorySaleInput::default())
            .await
            .unwrap();
        db.accessories()
            .create(day(8), AccessorySaleInput::default())
            .await
            .unwrap();
        db.accessories()
            .create(day(6), AccessorySaleInput::default())
            .await
            .unwrap();

        let page = db.accessories().list(1, 20).await.unwrap();
        let dates: Vec<NaiveDate> = page.items.iter().map(|r| r.sale_date).collect();
        assert_eq!(dates, vec![day(8), day(6), day(5)]);
    }
}
