//! Database module providing connection management, migrations, and queries.
//!
//! Queries are grouped per resource as `impl DbPool` blocks in the submodules.

pub mod projects;
pub mod test_cases;
pub mod test_runs;
pub mod test_suite_configs;
pub mod test_suites;
pub mod user_stories;

use std::time::Duration;

use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::{Config, DatabaseConfig};
use crate::error::{AppError, AppResult};
use crate::migration::Migrator;

/// Database connection pool wrapper.
///
/// Built once at startup and shared with handlers through `web::Data`.
/// Every query checks a connection out of the pool and returns it on drop.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Create a new database pool from configuration.
    pub async fn new(config: &Config) -> AppResult<Self> {
        Self::connect(&config.database).await
    }

    /// Connect using explicit database settings.
    pub async fn connect(settings: &DatabaseConfig) -> AppResult<Self> {
        let mut options = ConnectOptions::new(settings.url.clone());
        options
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(30))
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        info!(
            "Database pool ready (max_connections={}, min_connections={})",
            settings.max_connections, settings.min_connections
        );

        Ok(DbPool { conn })
    }

    /// Apply all pending schema migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Failed to run migrations: {}", e)))
    }

    /// Get access to the pooled connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Start a transaction. Dropping it without `commit` rolls it back.
    pub async fn begin(&self) -> AppResult<DatabaseTransaction> {
        self.conn
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))
    }
}

/// Error mapper for `ActiveModel::update`.
///
/// A row deleted between the lookup and the update surfaces as
/// `RecordNotUpdated`, which is reported as a missing `resource`.
pub(crate) fn update_error(resource: &'static str) -> impl FnOnce(DbErr) -> AppError {
    move |e| match e {
        DbErr::RecordNotUpdated => AppError::NotFound(resource.to_string()),
        other => AppError::Database(format!(
            "Failed to update {}: {}",
            resource.to_lowercase(),
            other
        )),
    }
}
