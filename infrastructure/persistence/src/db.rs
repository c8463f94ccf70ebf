use business::domain::errors::RepositoryError;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{path::Path, time::Duration};
use thiserror::Error;

/// Postgres SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("database.connection_error")]
    ConnectionError,
    #[error("database.migration_error")]
    MigrationError,
}

/// Configuration for the database connection
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default values
    pub fn new(connection_string: String) -> Self {
        Self {
            connection_string,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }
}

/// Creates a PostgreSQL connection pool
pub async fn create_postgres_pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.connection_string)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Could not connect to Postgres");
            DatabaseError::ConnectionError
        })?;

    Ok(pool)
}

/// Runs database migrations from the specified directory
pub async fn run_migrations(pool: &PgPool, migrations_path: &str) -> Result<(), DatabaseError> {
    let path = Path::new(migrations_path);

    if !path.exists() {
        tracing::error!(path = migrations_path, "Migrations directory not found");
        return Err(DatabaseError::MigrationError);
    }

    sqlx::migrate::Migrator::new(path)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Could not load migrations");
            DatabaseError::MigrationError
        })?
        .run(pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Migrations failed");
            DatabaseError::MigrationError
        })
}

/// Logs the driver error and hides it behind a `RepositoryError`.
pub(crate) fn repository_error(error: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_error) = &error
        && db_error.code().as_deref() == Some(UNIQUE_VIOLATION)
    {
        tracing::warn!(error = %error, "Unique constraint violated");
        return RepositoryError::Duplicated;
    }

    tracing::error!(error = %error, "Database query failed");
    RepositoryError::DatabaseError
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_pool_settings() {
        let config = DatabaseConfig::new("postgres://localhost/sweets".to_string());

        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout, Duration::from_secs(30));
    }

    #[test]
    fn should_override_max_connections() {
        let config =
            DatabaseConfig::new("postgres://localhost/sweets".to_string()).with_max_connections(12);

        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn should_map_driver_failures_to_database_error() {
        assert!(matches!(
            repository_error(sqlx::Error::PoolTimedOut),
            RepositoryError::DatabaseError
        ));
    }

    #[tokio::test]
    async fn should_fail_when_migrations_directory_is_missing() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/sweets")
            .unwrap();

        let result = run_migrations(&pool, "does/not/exist").await;

        assert!(matches!(result, Err(DatabaseError::MigrationError)));
    }
}
