use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::repository::SweetRepository;
use crate::domain::sweet::use_cases::get_paginated::{GetSweetsPageParams, GetSweetsPageUseCase};
use crate::domain::sweet::value_objects::{PageRequest, SweetPage};

pub struct GetSweetsPageUseCaseImpl {
    pub repository: Arc<dyn SweetRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetSweetsPageUseCase for GetSweetsPageUseCaseImpl {
    async fn execute(&self, params: GetSweetsPageParams) -> Result<SweetPage, SweetError> {
        let request = PageRequest::new(params.page, params.limit)?;

        self.logger.debug(&format!(
            "Fetching sweets page {} (limit {})",
            request.page(),
            request.limit()
        ));

        let sweets = self
            .repository
            .get_page(request.offset(), request.limit())
            .await?;
        let total = self.repository.count().await?;

        Ok(SweetPage {
            sweets,
            total,
            pages: request.page_count(total),
        })
    }
}
