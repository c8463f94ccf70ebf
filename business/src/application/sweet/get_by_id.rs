use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::shared::entity_id::EntityId;
use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::Sweet;
use crate::domain::sweet::repository::SweetRepository;
use crate::domain::sweet::use_cases::get_by_id::{GetSweetByIdParams, GetSweetByIdUseCase};

pub struct GetSweetByIdUseCaseImpl {
    pub repository: Arc<dyn SweetRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetSweetByIdUseCase for GetSweetByIdUseCaseImpl {
    async fn execute(&self, params: GetSweetByIdParams) -> Result<Sweet, SweetError> {
        let id = EntityId::parse(&params.id)?;

        self.logger.debug(&format!("Fetching sweet by id: {}", id));

        self.repository
            .get_by_id(id)
            .await
            .map_err(SweetError::from_lookup)
    }
}
