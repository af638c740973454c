use sqlx::{postgres::PgPoolOptions, Executor, PgPool};
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Idempotent bootstrap for the four-table schema
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Errors from the repository layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Database not initialized")]
    NotInitialized,

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        // 23505 = unique_violation
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unique constraint").to_string();
                return DatabaseError::DuplicateKey(constraint);
            }
        }
        DatabaseError::Sqlx(err)
    }
}

/// Owner of the process-wide connection pool.
///
/// The pool is opened once by [`DatabaseManager::init`] at startup, handed
/// out as cheap clones per request and closed by [`DatabaseManager::close`]
/// at shutdown.
pub struct DatabaseManager;

impl DatabaseManager {
    fn slot() -> &'static OnceLock<PgPool> {
        static POOL: OnceLock<PgPool> = OnceLock::new();
        &POOL
    }

    /// Open the pool from DATABASE_URL. Calling it again returns the existing pool.
    pub async fn init(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        if let Some(pool) = Self::slot().get() {
            return Ok(pool.clone());
        }

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let display_url = Self::redact(&database_url)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&database_url)
            .await?;

        info!("Connected database pool: {}", display_url);
        Ok(Self::slot().get_or_init(|| pool).clone())
    }

    /// Get the shared pool
    pub fn pool() -> Result<PgPool, DatabaseError> {
        Self::slot().get().cloned().ok_or(DatabaseError::NotInitialized)
    }

    /// Create the tables if they do not exist yet
    pub async fn ensure_schema() -> Result<(), DatabaseError> {
        let pool = Self::pool()?;
        // Multiple statements go through the simple query protocol
        pool.execute(SCHEMA_SQL).await?;
        info!("Database schema verified");
        Ok(())
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close() {
        if let Some(pool) = Self::slot().get() {
            pool.close().await;
            info!("Closed database pool");
        }
    }

    /// Connection target with the password masked, for logs
    fn redact(database_url: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(database_url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("****")).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }
}
