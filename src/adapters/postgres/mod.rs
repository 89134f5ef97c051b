//! PostgreSQL adapters - Database implementations for the learning path ports.
//!
//! - `PostgresLearningPathRepository` - Aggregate persistence with optimistic locking
//! - `PostgresLearningPathReader` - Listing and statistics queries
//! - `PostgresHealthCheck` - Connection check

mod learning_path_reader;
mod learning_path_repository;

pub use learning_path_reader::PostgresLearningPathReader;
pub use learning_path_repository::PostgresLearningPathRepository;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;
use crate::ports::HealthCheck;

/// Opens a connection pool sized by the configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.pool_size)
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.url)
        .await
}

/// Applies the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Health check that round-trips a trivial query.
#[derive(Clone)]
pub struct PostgresHealthCheck {
    pool: PgPool,
}

impl PostgresHealthCheck {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthCheck for PostgresHealthCheck {
    fn store_name(&self) -> &'static str {
        "postgres"
    }

    async fn check(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Database health check failed", e))?;
        Ok(())
    }
}
