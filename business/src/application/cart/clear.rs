use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartView;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use crate::domain::cart::value_objects::TaxRate;
use crate::domain::logger::Logger;

pub struct ClearCartUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub tax_rate: TaxRate,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ClearCartUseCase for ClearCartUseCaseImpl {
    async fn execute(&self, params: ClearCartParams) -> Result<CartView, CartError> {
        let Some(mut cart) = self.repository.find_active(&params.user_id).await? else {
            return Ok(CartView::of(None, self.tax_rate));
        };

        self.repository.clear_items(cart.id).await?;
        cart.clear();

        self.logger.info(&format!("Cleared cart {}", cart.id));
        Ok(CartView::of(Some(cart), self.tax_rate))
    }
}
