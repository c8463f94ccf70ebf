use std::sync::Arc;

use logger::TracingLogger;
use persistence::cart::repository::CartRepositoryPostgres;
use persistence::sweet::repository::SweetRepositoryPostgres;

use business::application::cart::add_item::AddCartItemUseCaseImpl;
use business::application::cart::checkout::CheckoutUseCaseImpl;
use business::application::cart::clear::ClearCartUseCaseImpl;
use business::application::cart::get::GetCartUseCaseImpl;
use business::application::cart::get_orders::GetOrdersUseCaseImpl;
use business::application::cart::remove_item::RemoveCartItemUseCaseImpl;
use business::application::cart::summary::GetCartSummaryUseCaseImpl;
use business::application::cart::update_item::UpdateCartItemUseCaseImpl;
use business::application::sweet::create::CreateSweetUseCaseImpl;
use business::application::sweet::delete::DeleteSweetUseCaseImpl;
use business::application::sweet::get_all::GetAllSweetsUseCaseImpl;
use business::application::sweet::get_by_id::GetSweetByIdUseCaseImpl;
use business::application::sweet::get_paginated::GetSweetsPageUseCaseImpl;
use business::application::sweet::purchase::PurchaseSweetUseCaseImpl;
use business::application::sweet::restock::RestockSweetUseCaseImpl;
use business::application::sweet::search::SearchSweetsUseCaseImpl;
use business::application::sweet::update::UpdateSweetUseCaseImpl;
use business::domain::cart::repository::CartRepository;
use business::domain::cart::value_objects::TaxRate;
use business::domain::logger::Logger;
use business::domain::sweet::repository::SweetRepository;

use crate::api::cart::routes::CartApi;
use crate::api::health::routes::HealthApi;
use crate::api::sweet::routes::SweetApi;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub sweet_api: SweetApi,
    pub cart_api: CartApi,
}

impl DependencyContainer {
    pub fn new(pool: sqlx::PgPool, tax_rate: TaxRate) -> Self {
        let sweet_repository = Arc::new(SweetRepositoryPostgres::new(pool.clone()));
        let cart_repository = Arc::new(CartRepositoryPostgres::new(pool));

        Self::with_repositories(sweet_repository, cart_repository, tax_rate)
    }

    /// Wires every use case over the given ports.
    pub fn with_repositories(
        sweet_repository: Arc<dyn SweetRepository>,
        cart_repository: Arc<dyn CartRepository>,
        tax_rate: TaxRate,
    ) -> Self {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);

        // Sweet use cases
        let sweet_api = SweetApi::new(
            Arc::new(CreateSweetUseCaseImpl {
                repository: sweet_repository.clone(),
                logger: logger.clone(),
            }),
            Arc::new(GetAllSweetsUseCaseImpl {
                repository: sweet_repository.clone(),
                logger: logger.clone(),
            }),
            Arc::new(GetSweetsPageUseCaseImpl {
                repository: sweet_repository.clone(),
                logger: logger.clone(),
            }),
            Arc::new(SearchSweetsUseCaseImpl {
                repository: sweet_repository.clone(),
                logger: logger.clone(),
            }),
            Arc::new(GetSweetByIdUseCaseImpl {
                repository: sweet_repository.clone(),
                logger: logger.clone(),
            }),
            Arc::new(UpdateSweetUseCaseImpl {
                repository: sweet_repository.clone(),
                logger: logger.clone(),
            }),
            Arc::new(DeleteSweetUseCaseImpl {
                repository: sweet_repository.clone(),
                logger: logger.clone(),
            }),
            Arc::new(PurchaseSweetUseCaseImpl {
                repository: sweet_repository.clone(),
                logger: logger.clone(),
            }),
            Arc::new(RestockSweetUseCaseImpl {
                repository: sweet_repository.clone(),
                logger: logger.clone(),
            }),
        );

        // Cart use cases
        let cart_api = CartApi::new(
            Arc::new(GetCartUseCaseImpl {
                repository: cart_repository.clone(),
                tax_rate,
                logger: logger.clone(),
            }),
            Arc::new(GetCartSummaryUseCaseImpl {
                repository: cart_repository.clone(),
                tax_rate,
                logger: logger.clone(),
            }),
            Arc::new(AddCartItemUseCaseImpl {
                repository: cart_repository.clone(),
                sweet_repository,
                tax_rate,
                logger: logger.clone(),
            }),
            Arc::new(UpdateCartItemUseCaseImpl {
                repository: cart_repository.clone(),
                tax_rate,
                logger: logger.clone(),
            }),
            Arc::new(RemoveCartItemUseCaseImpl {
                repository: cart_repository.clone(),
                tax_rate,
                logger: logger.clone(),
            }),
            Arc::new(ClearCartUseCaseImpl {
                repository: cart_repository.clone(),
                tax_rate,
                logger: logger.clone(),
            }),
            Arc::new(CheckoutUseCaseImpl {
                repository: cart_repository.clone(),
                tax_rate,
                logger: logger.clone(),
            }),
            Arc::new(GetOrdersUseCaseImpl {
                repository: cart_repository,
                logger,
            }),
        );

        Self {
            health_api: HealthApi::new(),
            sweet_api,
            cart_api,
        }
    }
}
