//! # User Repository
//!
//! The user directory as seen by the booking engine: resolve an id to a
//! user record. Account management lives elsewhere; `insert` exists for
//! seeding and tests.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use shareit_core::User;

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Inserts a user and returns it with its assigned id.
    ///
    /// Fails with `UniqueViolation` when the email is taken.
    pub async fn insert(&self, name: &str, email: &str) -> DbResult<User> {
        debug!(email = %email, "Inserting user");

        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?1, ?2)")
            .bind(name)
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    /// Counts users (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let users = db.users();

        let anna = users.insert("Anna", "anna@example.com").await.unwrap();
        let found = users.get_by_id(anna.id).await.unwrap();

        assert_eq!(found, Some(anna));
        assert_eq!(users.get_by_id(999).await.unwrap(), None);
        assert_eq!(users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let users = db.users();

        users.insert("Anna", "anna@example.com").await.unwrap();
        let err = users.insert("Other", "anna@example.com").await.unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
