use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::shared::entity_id::EntityId;
use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::Sweet;
use crate::domain::sweet::repository::SweetRepository;
use crate::domain::sweet::use_cases::delete::{DeleteSweetParams, DeleteSweetUseCase};

pub struct DeleteSweetUseCaseImpl {
    pub repository: Arc<dyn SweetRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteSweetUseCase for DeleteSweetUseCaseImpl {
    async fn execute(&self, params: DeleteSweetParams) -> Result<Sweet, SweetError> {
        if !params.caller.is_admin() {
            self.logger.warn(&format!(
                "User {} is not allowed to delete sweets",
                params.caller.user_id
            ));
            return Err(SweetError::Forbidden);
        }

        let id = EntityId::parse(&params.id)?;

        self.logger.info(&format!("Deleting sweet: {}", id));

        // Cart lines referencing the sweet are kept; they show up as unavailable
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(SweetError::from_lookup)?;

        self.logger.info(&format!("Sweet deleted: {}", id));
        Ok(deleted)
    }
}
