use poem::{
    Endpoint, EndpointExt, Route, Server as PoemServer, listener::TcpListener,
    middleware::{Cors, Tracing},
};
use poem_openapi::OpenApiService;

use crate::{
    api::error::render_framework_error,
    config::{app_config::AppConfig, auth_config::AuthConfig},
    setup::dependency_injection::DependencyContainer,
};

pub const API_PREFIX: &str = "/api";

pub struct Server;

impl Server {
    /// Full application: the API under `/api`, Swagger UI and the OpenAPI document.
    pub fn app(
        container: DependencyContainer,
        auth: AuthConfig,
        cors: Cors,
        public_url: String,
    ) -> impl Endpoint {
        let api_service = OpenApiService::new(
            (container.health_api, container.sweet_api, container.cart_api),
            "Sweet Shop API",
            env!("CARGO_PKG_VERSION"),
        )
        .server(format!("{}{}", public_url, API_PREFIX));
        let ui = api_service.swagger_ui();
        let spec = api_service.spec_endpoint();

        Route::new()
            .nest(API_PREFIX, api_service)
            .nest("/docs", ui)
            .nest("/openapi.json", spec)
            .catch_all_error(render_framework_error)
            .data(auth)
            .with(cors)
            .with(Tracing)
    }

    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let public_url = format!("http://{}", addr);
        let app = Self::app(container, config.auth, config.cors, public_url.clone());

        tracing::info!("Server running at {}", public_url);
        tracing::info!("Swagger UI at {}/docs", public_url);
        tracing::info!("OpenAPI JSON at {}/openapi.json", public_url);
        PoemServer::new(TcpListener::bind(&addr)).run(app).await?;
        Ok(())
    }
}
