use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use super::StoreError;
use crate::config::{redact_database_url, DatabaseConfig};

/// Open the connection pool described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let url = config
        .url
        .as_deref()
        .ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout))
        .connect(url)
        .await?;

    info!("Created database pool for: {}", redact_database_url(url));
    Ok(pool)
}

/// Apply pending migrations from `migrations/`.
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
