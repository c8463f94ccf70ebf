use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartView;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::remove_item::{RemoveCartItemParams, RemoveCartItemUseCase};
use crate::domain::cart::value_objects::TaxRate;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::shared::entity_id::EntityId;

pub struct RemoveCartItemUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub tax_rate: TaxRate,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RemoveCartItemUseCase for RemoveCartItemUseCaseImpl {
    async fn execute(&self, params: RemoveCartItemParams) -> Result<CartView, CartError> {
        let item_id = EntityId::parse(&params.item_id)?;

        let mut cart = self
            .repository
            .find_active(&params.user_id)
            .await?
            .ok_or(CartError::ItemNotFound)?;

        let removed = cart.remove_item(item_id)?;
        self.repository
            .delete_item(cart.id, removed.id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CartError::ItemNotFound,
                other => CartError::Repository(other),
            })?;

        self.logger
            .info(&format!("Removed line {} from cart {}", removed.id, cart.id));
        Ok(CartView::of(Some(cart), self.tax_rate))
    }
}
