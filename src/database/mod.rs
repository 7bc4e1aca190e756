//! Read-only access to the climate store
//!
//! The `measurement` and `station` tables are owned by an external,
//! pre-populated database; this layer never creates or mutates them. Each
//! domain has its own DAO, built on demand over the shared connection pool.

use crate::database::config::DatabaseConfig;
use crate::health::{HealthCheckResult, HealthChecker};
use async_trait::async_trait;
use sea_orm::{ConnectOptions, DatabaseConnection};
use thiserror::Error;
use tracing::info;

pub mod config;
pub mod dao;
pub mod entities;

pub use dao::{DateRange, MeasurementsDao, StationActivity, StationsDao, TemperatureStats};

/// Database error types
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Database(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Database manager trait for dependency injection and testing
#[async_trait]
pub trait DatabaseManager: Send + Sync {
    /// Health check for database connection
    async fn health_check(&self) -> DatabaseResult<()>;

    /// Confirm both tables exist and are queryable
    async fn verify_schema(&self) -> DatabaseResult<()>;

    /// Close the connection pool
    async fn close(&self) -> DatabaseResult<()>;

    /// Get measurements DAO
    fn measurements(&self) -> MeasurementsDao;

    /// Get stations DAO
    fn stations(&self) -> StationsDao;
}

/// Pooled database connection manager
pub struct DatabaseManagerImpl {
    pub connection: DatabaseConnection,
}

impl DatabaseManagerImpl {
    /// Create database manager from configuration
    pub async fn new_from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let mut options = ConnectOptions::new(config.url.clone());
        options.max_connections(config.max_connections);

        let connection = sea_orm::Database::connect(options)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl DatabaseManager for DatabaseManagerImpl {
    async fn health_check(&self) -> DatabaseResult<()> {
        self.connection
            .ping()
            .await
            .map_err(|e| DatabaseError::Database(format!("db error: {}", e)))
    }

    async fn verify_schema(&self) -> DatabaseResult<()> {
        let stations = self.stations().count().await?;
        let measurements = self.measurements().count().await?;
        info!(stations, measurements, "Climate tables available");
        Ok(())
    }

    async fn close(&self) -> DatabaseResult<()> {
        self.connection
            .clone()
            .close()
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    fn measurements(&self) -> MeasurementsDao {
        MeasurementsDao::new(self.connection.clone())
    }

    fn stations(&self) -> StationsDao {
        StationsDao::new(self.connection.clone())
    }
}

#[async_trait]
impl HealthChecker for DatabaseManagerImpl {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthCheckResult {
        match self.health_check().await {
            Ok(_) => HealthCheckResult::healthy_with_details(serde_json::json!({
                "status": "healthy",
                "connection": "ok"
            })),
            Err(err) => HealthCheckResult::unhealthy_with_details(
                "DB health check failed".to_string(),
                serde_json::json!({
                    "status": "unhealthy",
                    "error": err.to_string()
                }),
            ),
        }
    }
}
