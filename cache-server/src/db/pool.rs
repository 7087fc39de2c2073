//! Shared PostgreSQL pool
//!
//! Created once by `cache serve` and cloned into both repositories. Requests
//! check a connection out per statement; no timeouts or retries are set here.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connections used when `--max-connections` is not given.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connect with [`DEFAULT_MAX_CONNECTIONS`].
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/cache").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect with an explicit connection limit.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
