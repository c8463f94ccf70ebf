use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartView;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::get::{GetCartParams, GetCartUseCase};
use crate::domain::cart::value_objects::TaxRate;
use crate::domain::logger::Logger;

pub struct GetCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub tax_rate: TaxRate,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCartUseCase for GetCartUseCaseImpl {
    async fn execute(&self, params: GetCartParams) -> Result<CartView, CartError> {
        self.logger
            .debug(&format!("Fetching cart for user: {}", params.user_id));

        let cart = self.repository.find_active(&params.user_id).await?;
        Ok(CartView::of(cart, self.tax_rate))
    }
}
