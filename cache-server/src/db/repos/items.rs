//! Item repository
//!
//! Items carry a mandatory `location_id`; the schema rejects unknown locations.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{contains_pattern, ItemFilter, ItemRepo};
use crate::db::DbError;
use crate::models::{Item, NewItem};

const COLUMNS: &str = "id, name, location_id, created_at, updated_at";

/// PostgreSQL-backed item repository
#[derive(Clone)]
pub struct PgItemRepo {
    pool: PgPool,
}

impl PgItemRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn not_found(id: i64) -> DbError {
        DbError::NotFound {
            resource: "item",
            id,
        }
    }
}

#[async_trait]
impl ItemRepo for PgItemRepo {
    /// Filters are appended as bound parameters only.
    async fn list(&self, filter: &ItemFilter) -> Result<Vec<Item>, DbError> {
        let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM items"));
        let mut keyword = " WHERE ";

        if let Some(term) = filter.search.as_deref() {
            query.push(keyword).push("name ILIKE ");
            query.push_bind(contains_pattern(term));
            keyword = " AND ";
        }
        if let Some(location_id) = filter.location_id {
            query.push(keyword).push("location_id = ");
            query.push_bind(location_id);
        }
        query.push(r#" ORDER BY name COLLATE "C", id"#);

        let items = query.build_query_as::<Item>().fetch_all(&self.pool).await?;
        Ok(items)
    }

    async fn get(&self, id: i64) -> Result<Item, DbError> {
        sqlx::query_as::<_, Item>(&format!("SELECT {COLUMNS} FROM items WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, item: NewItem) -> Result<Item, DbError> {
        let created = sqlx::query_as::<_, Item>(&format!(
            "INSERT INTO items (name, location_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        ))
        .bind(item.name.as_str())
        .bind(item.location_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = created.id, location_id = created.location_id, "item created");
        Ok(created)
    }

    async fn update(&self, id: i64, item: NewItem) -> Result<Item, DbError> {
        sqlx::query_as::<_, Item>(&format!(
            r#"
            UPDATE items
            SET name = $1, location_id = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING {COLUMNS}
            "#
        ))
        .bind(item.name.as_str())
        .bind(item.location_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Self::not_found(id))
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{LocationRepo, PgLocationRepo, MIGRATOR};
    use crate::models::{NewLocation, RecordName};

    async fn seed_location(pool: &PgPool, name: &str) -> i64 {
        PgLocationRepo::new(pool.clone())
            .create(NewLocation {
                name: RecordName::new(name).unwrap(),
                parent_id: None,
            })
            .await
            .unwrap()
            .id
    }

    fn new_item(name: &str, location_id: i64) -> NewItem {
        NewItem {
            name: RecordName::new(name).unwrap(),
            location_id,
        }
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn filters_combine(pool: PgPool) {
        let garage = seed_location(&pool, "Garage").await;
        let attic = seed_location(&pool, "Attic").await;
        let repo = PgItemRepo::new(pool);

        repo.create(new_item("Toolbox", garage)).await.unwrap();
        repo.create(new_item("Box of cables", garage)).await.unwrap();
        repo.create(new_item("Hat box", attic)).await.unwrap();

        let all = repo.list(&ItemFilter::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Box of cables", "Hat box", "Toolbox"]);

        let filtered = repo
            .list(&ItemFilter {
                search: Some("box".into()),
                location_id: Some(garage),
            })
            .await
            .unwrap();
        let names: Vec<_> = filtered.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Box of cables", "Toolbox"]);
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn unknown_location_is_rejected(pool: PgPool) {
        let repo = PgItemRepo::new(pool);
        let err = repo.create(new_item("Orphan", 9999)).await.unwrap_err();
        assert!(matches!(err, DbError::Sqlx(_)));
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn update_missing_is_not_found(pool: PgPool) {
        let garage = seed_location(&pool, "Garage").await;
        let repo = PgItemRepo::new(pool);
        let err = repo.update(12345, new_item("Ghost", garage)).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
