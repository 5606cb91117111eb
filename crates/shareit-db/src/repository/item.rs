//! # Item Repository
//!
//! The item catalog as seen by the booking engine: resolve an id to
//! `{id, owner_id, available}` plus display fields, and list an owner's
//! items for the item views.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use shareit_core::{Item, PageRequest};

const SELECT_ITEM: &str = "SELECT id, name, description, available, owner_id FROM items";

/// Fields of an item before it has an id.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub available: bool,
}

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Gets an item by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        let sql = format!("{SELECT_ITEM} WHERE id = ?1");

        let item = sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Lists the items owned by `owner_id`, ordered by id.
    pub async fn list_by_owner(
        &self,
        owner_id: i64,
        page: Option<PageRequest>,
    ) -> DbResult<Vec<Item>> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_ITEM);
        qb.push(" WHERE owner_id = ").push_bind(owner_id);
        qb.push(" ORDER BY id");

        if let Some(page) = page {
            qb.push(" LIMIT ")
                .push_bind(page.limit())
                .push(" OFFSET ")
                .push_bind(page.offset());
        }

        let items = qb.build_query_as::<Item>().fetch_all(&self.pool).await?;

        Ok(items)
    }

    /// Inserts an item owned by `owner_id`.
    ///
    /// Fails with `ForeignKeyViolation` when the owner does not exist.
    pub async fn insert(&self, owner_id: i64, item: &NewItem) -> DbResult<Item> {
        debug!(owner_id = %owner_id, name = %item.name, "Inserting item");

        let result = sqlx::query(
            "INSERT INTO items (name, description, available, owner_id) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(Item {
            id: result.last_insert_rowid(),
            name: item.name.clone(),
            description: item.description.clone(),
            available: item.available,
            owner_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::{Database, DbConfig};
    use shareit_core::validation::validate_page_params;

    fn drill() -> NewItem {
        NewItem {
            name: "Drill".to_string(),
            description: "Cordless, two batteries".to_string(),
            available: true,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = db.users().insert("Owner", "owner@example.com").await.unwrap();

        let item = db.items().insert(owner.id, &drill()).await.unwrap();
        let found = db.items().get_by_id(item.id).await.unwrap().unwrap();

        assert_eq!(found, item);
        assert_eq!(found.snapshot().owner_id, owner.id);
        assert!(db.items().get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_owner_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.items().insert(42, &drill()).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_by_owner_paged() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = db.users().insert("Owner", "owner@example.com").await.unwrap();
        let other = db.users().insert("Other", "other@example.com").await.unwrap();

        for _ in 0..3 {
            db.items().insert(owner.id, &drill()).await.unwrap();
        }
        db.items().insert(other.id, &drill()).await.unwrap();

        let all = db.items().list_by_owner(owner.id, None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));

        let page = validate_page_params(Some(2), Some(2)).unwrap();
        let second = db.items().list_by_owner(owner.id, page).await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id, all[2].id);
    }
}
