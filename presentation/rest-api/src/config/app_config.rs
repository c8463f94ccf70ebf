use std::env;

use super::{
    auth_config::AuthConfig, cors_config, database_config::DatabaseSettings,
    server_config::ServerConfig, shop_config::ShopConfig,
};
use poem::middleware::Cors;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config.missing: {0}")]
    Missing(&'static str),
    #[error("config.invalid: {key}={value}")]
    Invalid { key: &'static str, value: String },
}

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub database: DatabaseSettings,
    pub auth: AuthConfig,
    pub shop: ShopConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let get = |key: &str| env::var(key).ok();
        Ok(Self {
            server: ServerConfig::from_source(get),
            cors: cors_config::init_cors(get),
            database: DatabaseSettings::from_source(get)?,
            auth: AuthConfig::from_source(get)?,
            shop: ShopConfig::from_source(get)?,
        })
    }
}
