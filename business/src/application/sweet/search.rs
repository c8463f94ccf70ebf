use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::Sweet;
use crate::domain::sweet::repository::SweetRepository;
use crate::domain::sweet::use_cases::search::{SearchSweetsParams, SearchSweetsUseCase};
use crate::domain::sweet::value_objects::SweetSearch;

pub struct SearchSweetsUseCaseImpl {
    pub repository: Arc<dyn SweetRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SearchSweetsUseCase for SearchSweetsUseCaseImpl {
    async fn execute(&self, params: SearchSweetsParams) -> Result<Vec<Sweet>, SweetError> {
        let search = SweetSearch::new(params.query, params.price_min, params.price_max)?;

        self.logger.debug(&format!(
            "Searching sweets: query={:?} min={:?} max={:?}",
            search.query, search.price_min, search.price_max
        ));

        Ok(self.repository.search(&search).await?)
    }
}
