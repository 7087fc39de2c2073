//! Location repository
//!
//! Locations reference their parent through a nullable `parent_id`.
//! The foreign key is enforced by the schema, not here.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{contains_pattern, LocationFilter, LocationRepo};
use crate::db::DbError;
use crate::models::{Location, NewLocation};

const COLUMNS: &str = "id, name, parent_id, created_at, updated_at";

/// PostgreSQL-backed location repository
#[derive(Clone)]
pub struct PgLocationRepo {
    pool: PgPool,
}

impl PgLocationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn not_found(id: i64) -> DbError {
        DbError::NotFound {
            resource: "location",
            id,
        }
    }
}

#[async_trait]
impl LocationRepo for PgLocationRepo {
    async fn list(&self, filter: &LocationFilter) -> Result<Vec<Location>, DbError> {
        let mut query = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM locations"));
        if let Some(term) = filter.search.as_deref() {
            query.push(" WHERE name ILIKE ");
            query.push_bind(contains_pattern(term));
        }
        query.push(r#" ORDER BY name COLLATE "C", id"#);

        let locations = query
            .build_query_as::<Location>()
            .fetch_all(&self.pool)
            .await?;
        Ok(locations)
    }

    async fn get(&self, id: i64) -> Result<Location, DbError> {
        sqlx::query_as::<_, Location>(&format!("SELECT {COLUMNS} FROM locations WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, location: NewLocation) -> Result<Location, DbError> {
        let created = sqlx::query_as::<_, Location>(&format!(
            "INSERT INTO locations (name, parent_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        ))
        .bind(location.name.as_str())
        .bind(location.parent_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = created.id, "location created");
        Ok(created)
    }

    async fn update(&self, id: i64, location: NewLocation) -> Result<Location, DbError> {
        sqlx::query_as::<_, Location>(&format!(
            r#"
            UPDATE locations
            SET name = $1, parent_id = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING {COLUMNS}
            "#
        ))
        .bind(location.name.as_str())
        .bind(location.parent_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Self::not_found(id))
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
