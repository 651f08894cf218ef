use anyhow::{Context, Result};
use sqlx::PgPool;

/// Connect to PostgreSQL. Pool sizing is left at sqlx defaults.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    PgPool::connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")
}

/// Apply the embedded migrations (creates the `users` table).
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::debug!("Database migrations applied");
    Ok(())
}
