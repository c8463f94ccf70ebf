use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartView;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::update_item::{UpdateCartItemParams, UpdateCartItemUseCase};
use crate::domain::cart::value_objects::TaxRate;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::shared::entity_id::EntityId;

pub struct UpdateCartItemUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub tax_rate: TaxRate,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateCartItemUseCase for UpdateCartItemUseCaseImpl {
    async fn execute(&self, params: UpdateCartItemParams) -> Result<CartView, CartError> {
        let item_id = EntityId::parse(&params.item_id)?;
        if params.quantity < 1 {
            return Err(CartError::QuantityNotPositive);
        }

        let mut cart = self
            .repository
            .find_active(&params.user_id)
            .await?
            .ok_or(CartError::ItemNotFound)?;

        let line = cart.set_item_quantity(item_id, params.quantity)?;
        self.repository
            .set_item_quantity(cart.id, line.id, line.quantity)
            .await
            .map_err(|e| match e {
                // removed or checked out since the read
                RepositoryError::NotFound => CartError::ItemNotFound,
                other => CartError::Repository(other),
            })?;

        self.logger.info(&format!(
            "Cart {} line {} set to {}",
            cart.id, line.id, line.quantity
        ));
        Ok(CartView::of(Some(cart), self.tax_rate))
    }
}
