//! # Client Repository
//!
//! Database operations for customers.
//!
//! Phone numbers are the natural business key: non-empty and unique. A
//! client's deletion cascades to every sale they made (schema rule).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{page_params, Page};
use bontez_core::validation::{validate_client_name, validate_phone};
use bontez_core::Client;

/// Repository for client database operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Creates a client.
    ///
    /// ## Errors
    /// * `DbError::Domain` - empty name, empty or malformed phone
    /// * `DbError::UniqueViolation` - phone already registered
    pub async fn create(
        &self,
        name: &str,
        phone: &str,
        email: Option<&str>,
        address: Option<&str>,
    ) -> DbResult<Client> {
        validate_client_name(name)?;
        validate_phone(phone)?;
        let name = name.trim();
        let phone = phone.trim();

        debug!(name = %name, phone = %phone, "Creating client");

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM clients WHERE phone = ?1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(DbError::duplicate("phone", phone));
        }

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO clients (name, phone, email, address, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(email)
        .bind(address)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Client {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.map(String::from),
            address: address.map(String::from),
            created_at: now,
        })
    }

    /// Gets a client by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, phone, email, address, created_at
            FROM clients
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Lists clients, paginated, oldest first.
    pub async fn list(&self, page: u32, limit: u32) -> DbResult<Page<Client>> {
        let (page, limit, offset) = page_params(page, limit);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await?;

        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, phone, email, address, created_at
            FROM clients
            ORDER BY id
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(clients, total, page, limit))
    }

    /// Deletes a client.
    ///
    /// The schema cascades to the client's sales.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting client");

        let result = sqlx::query("DELETE FROM clients WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", id));
        }

        Ok(())
    }

    /// Counts clients.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
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
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_create_and_get_client() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let created = db
            .clients()
            .create("John Kariuki", "0712345678", Some("john@example.com"), None)
            .await
            .unwrap();

        let fetched = db.clients().get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.phone, "0712345678");
        assert_eq!(fetched.email.as_deref(), Some("john@example.com"));
        assert_eq!(fetched.address, None);
    }

    #[tokio::test]
    async fn test_duplicate_phone_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.clients()
            .create("John", "0712345678", None, None)
            .await
            .unwrap();
        let err = db
            .clients()
            .create("Mary", "0712345678", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_invalid_phone_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.clients().create("John", "", None, None).await.is_err());
        assert!(db
            .clients()
            .create("John", "not a phone", None, None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_pagination() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        for i in 0..25 {
            db.clients()
                .create(&format!("Client {i}"), &format!("07000000{i:02}"), None, None)
                .await
                .unwrap();
        }

        let page1 = db.clients().list(1, 20).await.unwrap();
        assert_eq!(page1.items.len(), 20);
        assert_eq!(page1.total, 25);
        assert_eq!(page1.pages, 2);

        let page2 = db.clients().list(2, 20).await.unwrap();
        assert_eq!(page2.items.len(), 5);
        assert_eq!(page2.items[0].name, "Client 20");
    }
}
