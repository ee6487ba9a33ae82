//! # Product Repository
//!
//! Database operations for products (gas cylinders and accessories).
//!
//! Product prices feed the sale-item snapshot: a sale copies the price at
//! creation time, so updating a product here never rewrites history.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use bontez_core::validation::{validate_price_cents, validate_product_name};
use bontez_core::{CoreError, Product};

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub supplier_id: Option<i64>,
    /// Stored category, e.g. "cylinder_6kg", "accessory_burner".
    pub category: String,
    pub price_cents: i64,
    pub description: Option<String>,
}

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Creates a product.
    ///
    /// ## Errors
    /// * `DbError::Domain` - empty name, negative price, or the referenced
    ///   supplier does not exist
    pub async fn create(&self, input: NewProduct) -> DbResult<Product> {
        validate_product_name(&input.name)?;
        validate_price_cents(input.price_cents)?;
        let name = input.name.trim().to_string();

        if let Some(supplier_id) = input.supplier_id {
            let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM suppliers WHERE id = ?1")
                .bind(supplier_id)
                .fetch_optional(&self.pool)
                .await?;
            if exists.is_none() {
                return Err(CoreError::SupplierNotFound(supplier_id).into());
            }
        }

        debug!(name = %name, price_cents = input.price_cents, "Creating product");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO products (name, supplier_id, category, price_cents, description, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&name)
        .bind(input.supplier_id)
        .bind(&input.category)
        .bind(input.price_cents)
        .bind(&input.description)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name,
            supplier_id: input.supplier_id,
            category: input.category,
            price_cents: input.price_cents,
            description: input.description,
            created_at: now,
        })
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, supplier_id, category, price_cents, description, created_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists products, optionally filtered by supplier, ordered by name.
    pub async fn list(&self, supplier_id: Option<i64>) -> DbResult<Vec<Product>> {
        let products = match supplier_id {
            Some(supplier_id) => {
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, name, supplier_id, category, price_cents, description, created_at
                    FROM products
                    WHERE supplier_id = ?1
                    ORDER BY name
                    "#,
                )
                .bind(supplier_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, name, supplier_id, category, price_cents, description, created_at
                    FROM products
                    ORDER BY name
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(products)
    }

    /// Updates an existing product's details.
    ///
    /// Sale items keep their snapshotted unit price; only future sales see
    /// the new price.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        validate_product_name(&product.name)?;
        validate_price_cents(product.price_cents)?;

        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                supplier_id = ?3,
                category = ?4,
                price_cents = ?5,
                description = ?6
            WHERE id = ?1
            "#,
        )
        .bind(product.id)
        .bind(product.name.trim())
        .bind(product.supplier_id)
        .bind(&product.category)
        .bind(product.price_cents)
        .bind(&product.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// The schema cascades to sale items referencing it.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
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
    use super::NewProduct;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use bontez_core::CoreError;

    fn cylinder(name: &str, supplier_id: Option<i64>, price_cents: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            supplier_id,
            category: "cylinder_6kg".to_string(),
            price_cents,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let supplier = db.suppliers().create("Top Gas", "red").await.unwrap();

        let product = db
            .products()
            .create(cylinder("Gas Cylinder 6Kg - New", Some(supplier.id), 320_000))
            .await
            .unwrap();

        let fetched = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Gas Cylinder 6Kg - New");
        assert_eq!(fetched.price_cents, 320_000);
        assert_eq!(fetched.supplier_id, Some(supplier.id));
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .products()
            .create(cylinder("Bad", None, -1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(_)));
    }

    #[tokio::test]
    async fn test_unknown_supplier_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .products()
            .create(cylinder("Orphan", Some(999), 100))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::SupplierNotFound(999))
        ));
    }

    #[tokio::test]
    async fn test_list_filtered_by_supplier() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let top_gas = db.suppliers().create("Top Gas", "red").await.unwrap();
        let k_gas = db.suppliers().create("K-Gas", "black").await.unwrap();

        db.products()
            .create(cylinder("A", Some(top_gas.id), 100))
            .await
            .unwrap();
        db.products()
            .create(cylinder("B", Some(k_gas.id), 100))
            .await
            .unwrap();
        db.products()
            .create(cylinder("C", None, 100))
            .await
            .unwrap();

        assert_eq!(db.products().list(None).await.unwrap().len(), 3);
        let filtered = db.products().list(Some(top_gas.id)).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "A");
    }

    #[tokio::test]
    async fn test_update_price() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut product = db
            .products()
            .create(cylinder("Refill", None, 120_000))
            .await
            .unwrap();

        product.price_cents = 130_000;
        db.products().update(&product).await.unwrap();

        let fetched = db.products().get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(fetched.price_cents, 130_000);
    }

    #[tokio::test]
    async fn test_supplier_delete_cascades_to_products() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let supplier = db.suppliers().create("Top Gas", "red").await.unwrap();

        let product = db
            .products()
            .create(cylinder("A", Some(supplier.id), 100))
            .await
            .unwrap();

        db.suppliers().delete(supplier.id).await.unwrap();
        assert!(db.products().get_by_id(product.id).await.unwrap().is_none());
    }
}
