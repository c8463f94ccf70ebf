use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};
use sqlx::PgPool;

use super::app_config::ConfigError;

const DEFAULT_MIGRATIONS_PATH: &str = "infrastructure/persistence/migrations";

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub pool: DatabaseConfig,
    pub migrations_path: String,
}

impl DatabaseSettings {
    /// Environment variables:
    /// - DATABASE_URL: PostgreSQL connection string (required)
    /// - DATABASE_MAX_CONNECTIONS: pool size (default: 5)
    /// - MIGRATIONS_PATH: directory applied at startup
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let mut pool = DatabaseConfig::new(url);

        if let Some(raw) = get("DATABASE_MAX_CONNECTIONS") {
            let max = raw
                .parse::<u32>()
                .ok()
                .filter(|max| *max > 0)
                .ok_or(ConfigError::Invalid {
                    key: "DATABASE_MAX_CONNECTIONS",
                    value: raw,
                })?;
            pool = pool.with_max_connections(max);
        }

        Ok(Self {
            pool,
            migrations_path: get("MIGRATIONS_PATH")
                .unwrap_or_else(|| DEFAULT_MIGRATIONS_PATH.to_string()),
        })
    }
}

/// Connects the pool and brings the schema up to date.
pub async fn init_database(settings: &DatabaseSettings) -> anyhow::Result<PgPool> {
    let pool = create_postgres_pool(&settings.pool).await?;
    run_migrations(&pool, &settings.migrations_path).await?;
    tracing::info!(path = %settings.migrations_path, "Database migrations applied");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn should_require_database_url() {
        let result = DatabaseSettings::from_source(source(&[]));
        assert!(matches!(result, Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn should_apply_defaults() {
        let settings =
            DatabaseSettings::from_source(source(&[("DATABASE_URL", "postgres://db/shop")]))
                .unwrap();

        assert_eq!(settings.pool.max_connections, 5);
        assert_eq!(settings.migrations_path, DEFAULT_MIGRATIONS_PATH);
    }

    #[test]
    fn should_reject_zero_pool_size() {
        let result = DatabaseSettings::from_source(source(&[
            ("DATABASE_URL", "postgres://db/shop"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]));

        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn should_read_pool_size() {
        let settings = DatabaseSettings::from_source(source(&[
            ("DATABASE_URL", "postgres://db/shop"),
            ("DATABASE_MAX_CONNECTIONS", "20"),
        ]))
        .unwrap();

        assert_eq!(settings.pool.max_connections, 20);
    }
}
