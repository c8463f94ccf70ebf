use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::shared::entity_id::EntityId;
use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::{Sweet, validate_movement};
use crate::domain::sweet::repository::SweetRepository;
use crate::domain::sweet::use_cases::purchase::{PurchaseSweetParams, PurchaseSweetUseCase};

pub struct PurchaseSweetUseCaseImpl {
    pub repository: Arc<dyn SweetRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl PurchaseSweetUseCase for PurchaseSweetUseCaseImpl {
    async fn execute(&self, params: PurchaseSweetParams) -> Result<Sweet, SweetError> {
        let id = EntityId::parse(&params.id)?;
        validate_movement(params.quantity)?;

        self.logger.info(&format!(
            "User {} purchasing {} of sweet {}",
            params.caller.user_id, params.quantity, id
        ));

        let current = self
            .repository
            .get_by_id(id)
            .await
            .map_err(SweetError::from_lookup)?;

        if !current.has_stock_for(params.quantity) {
            return Err(SweetError::InsufficientStock);
        }

        // The store re-checks stock in the same statement as the decrement,
        // so a concurrent purchase can still make this fail.
        match self
            .repository
            .decrement_stock(id, params.quantity)
            .await?
        {
            Some(updated) => {
                self.logger.info(&format!(
                    "Sweet {} stock is now {}",
                    updated.id, updated.quantity
                ));
                Ok(updated)
            }
            None => {
                // a concurrent delete also leaves nothing to decrement
                self.repository
                    .get_by_id(id)
                    .await
                    .map_err(SweetError::from_lookup)?;
                self.logger
                    .warn(&format!("Stock for sweet {} ran out during purchase", id));
                Err(SweetError::InsufficientStock)
            }
        }
    }
}
