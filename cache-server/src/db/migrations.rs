//! Schema migrations for the locations and items tables

use sqlx::migrate::Migrator;
use sqlx::PgPool;

use super::DbError;

/// Embedded migrations from `cache-server/migrations`
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply any pending migrations.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");
    MIGRATOR.run(pool).await?;
    tracing::info!("Migrations complete");
    Ok(())
}
