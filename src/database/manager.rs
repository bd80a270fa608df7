use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Lazily-created, process-wide connection pool.
///
/// The pool is opened on first use and cached for the lifetime of the manager;
/// concurrent first callers all await the same in-flight connect instead of
/// racing to open duplicates. One manager is built in main and handed to every
/// handler through the router state.
#[derive(Default)]
pub struct DatabaseManager {
    pool: OnceCell<PgPool>,
}

impl DatabaseManager {
    pub fn new() -> Self {
        Self { pool: OnceCell::new() }
    }

    /// Get the shared pool, creating it (and applying pending migrations) on
    /// first call.
    pub async fn pool(&self) -> Result<PgPool, DatabaseError> {
        let pool = self.pool.get_or_try_init(|| Self::connect()).await?;
        Ok(pool.clone())
    }

    async fn connect() -> Result<PgPool, DatabaseError> {
        let cfg = &config::config().database;
        let url = cfg.url.as_deref().ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        // Cheap sanity parse so a malformed URL fails here, not inside the driver
        url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;

        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
            .connect(url)
            .await?;

        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

        info!("Created database pool");
        Ok(pool)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        let pool = self.pool().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }
}
