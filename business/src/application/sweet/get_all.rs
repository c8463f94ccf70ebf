use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::Sweet;
use crate::domain::sweet::repository::SweetRepository;
use crate::domain::sweet::use_cases::get_all::GetAllSweetsUseCase;

pub struct GetAllSweetsUseCaseImpl {
    pub repository: Arc<dyn SweetRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetAllSweetsUseCase for GetAllSweetsUseCaseImpl {
    async fn execute(&self) -> Result<Vec<Sweet>, SweetError> {
        self.logger.debug("Fetching all sweets");

        let sweets = self.repository.get_all().await?;

        self.logger
            .debug(&format!("Fetched {} sweets", sweets.len()));
        Ok(sweets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sweet::repository::MockSweetRepository;
    use crate::test_support::{mock_logger, sweet_fixture};

    #[tokio::test]
    async fn should_return_all_sweets() {
        let mut mock_repo = MockSweetRepository::new();
        mock_repo.expect_get_all().returning(|| {
            Ok(vec![
                sweet_fixture("Lollipop", "0.50", 50),
                sweet_fixture("Chocolate Bar", "2.50", 100),
            ])
        });

        let use_case = GetAllSweetsUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let sweets = use_case.execute().await.unwrap();

        assert_eq!(sweets.len(), 2);
        assert_eq!(sweets[0].name, "Lollipop");
    }

    #[tokio::test]
    async fn should_return_empty_list_when_catalog_is_empty() {
        let mut mock_repo = MockSweetRepository::new();
        mock_repo.expect_get_all().returning(|| Ok(vec![]));

        let use_case = GetAllSweetsUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        assert!(use_case.execute().await.unwrap().is_empty());
    }
}
