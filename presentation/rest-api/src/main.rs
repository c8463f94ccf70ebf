use dotenvy::dotenv;

mod api {
    pub mod error;
    pub mod security;
    pub mod tags;
    pub mod health {
        pub mod routes;
    }
    pub mod sweet {
        pub mod dto;
        pub mod routes;
    }
    pub mod cart {
        pub mod dto;
        pub mod routes;
    }
}
mod config {
    pub mod app_config;
    pub mod auth_config;
    pub mod cors_config;
    pub mod database_config;
    pub mod server_config;
    pub mod shop_config;
}
mod setup {
    pub mod dependency_injection;
    pub mod server;
    #[cfg(test)]
    mod e2e_tests;
    #[cfg(test)]
    mod in_memory;
}

use config::{app_config::AppConfig, database_config};
use setup::{dependency_injection::DependencyContainer, server::Server};

/// REST API Entry Point
///
/// Initializes the application, wires dependencies, and starts the HTTP server.
/// - config/: environment configuration (server, CORS, database, auth, shop)
/// - setup/: dependency injection and server setup
/// - api/: route handlers, DTOs and the bearer security scheme
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 2. Load environment variables
    dotenv().ok();

    // 3. Load configuration
    let config = AppConfig::from_env()?;

    // 4. Initialize database and apply migrations
    let pool = database_config::init_database(&config.database).await?;

    // 5. Wire dependencies
    let container = DependencyContainer::new(pool, config.shop.tax_rate);

    // 6. Run server
    Server::run(config, container).await?;

    Ok(())
}
