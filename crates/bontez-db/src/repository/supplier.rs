//! # Supplier Repository
//!
//! Database operations for gas suppliers.
//!
//! Deleting a supplier is deliberately aggressive: the schema cascades the
//! delete to the supplier's products and to every sale attributed to it,
//! erasing that slice of sales history. The cascade lives in the schema
//! (`ON DELETE CASCADE`), not here.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use bontez_core::validation::validate_supplier_name;
use bontez_core::{Supplier, ValidationError};

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Creates a supplier.
    ///
    /// ## Errors
    /// * `DbError::Domain` - empty name or color
    /// * `DbError::UniqueViolation` - supplier name already exists
    pub async fn create(&self, name: &str, color: &str) -> DbResult<Supplier> {
        validate_supplier_name(name)?;
        let name = name.trim();
        let color = color.trim();
        if color.is_empty() {
            return Err(ValidationError::Required {
                field: "color".to_string(),
            }
            .into());
        }

        debug!(name = %name, "Creating supplier");

        // Pre-check for a friendly duplicate message; the UNIQUE constraint
        // still backstops races.
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM suppliers WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(DbError::duplicate("supplier name", name));
        }

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO suppliers (name, color, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(name)
        .bind(color)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Supplier {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            color: color.to_string(),
            created_at: now,
        })
    }

    /// Gets a supplier by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, color, created_at
            FROM suppliers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Lists all suppliers ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, color, created_at
            FROM suppliers
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }

    /// Deletes a supplier.
    ///
    /// The schema cascades to the supplier's products and sales.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting supplier");

        let result = sqlx::query("DELETE FROM suppliers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", id));
        }

        Ok(())
    }

    /// Counts suppliers (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM suppliers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::error::DbError;

    #[tokio::test]
    async fn test_create_and_get_supplier() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let created = db.suppliers().create("Top Gas", "red").await.unwrap();
        assert!(created.id >= 1);

        let fetched = db.suppliers().get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Top Gas");
        assert_eq!(fetched.color, "red");
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.suppliers().create("Top Gas", "red").await.unwrap();
        let err = db.suppliers().create("Top Gas", "blue").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.suppliers().create("  ", "red").await.is_err());
        assert!(db.suppliers().create("K-Gas", "").await.is_err());
    }

    #[tokio::test]
    async fn test_list_ordered_by_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.suppliers().create("Total Gas", "orange").await.unwrap();
        db.suppliers().create("Hashi Gas", "yellow").await.unwrap();

        let names: Vec<String> = db
            .suppliers()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Hashi Gas", "Total Gas"]);
    }

    #[tokio::test]
    async fn test_delete_missing_supplier() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.suppliers().delete(999).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
