use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::shared::entity_id::EntityId;
use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::{Sweet, validate_movement};
use crate::domain::sweet::repository::SweetRepository;
use crate::domain::sweet::use_cases::restock::{RestockSweetParams, RestockSweetUseCase};

pub struct RestockSweetUseCaseImpl {
    pub repository: Arc<dyn SweetRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RestockSweetUseCase for RestockSweetUseCaseImpl {
    async fn execute(&self, params: RestockSweetParams) -> Result<Sweet, SweetError> {
        if !params.caller.is_admin() {
            self.logger.warn(&format!(
                "User {} is not allowed to restock sweets",
                params.caller.user_id
            ));
            return Err(SweetError::Forbidden);
        }

        let id = EntityId::parse(&params.id)?;
        validate_movement(params.quantity)?;

        self.logger
            .info(&format!("Restocking sweet {} by {}", id, params.quantity));

        match self.repository.increment_stock(id, params.quantity).await? {
            Some(updated) => {
                self.logger.info(&format!(
                    "Sweet {} stock is now {}",
                    updated.id, updated.quantity
                ));
                Ok(updated)
            }
            None => {
                // either the sweet is gone or the new stock would not fit
                let current = self
                    .repository
                    .get_by_id(id)
                    .await
                    .map_err(SweetError::from_lookup)?;
                self.logger.warn(&format!(
                    "Restock of sweet {} by {} rejected: stock {} is at its limit",
                    id, params.quantity, current.quantity
                ));
                Err(SweetError::StockTooLarge)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{DomainError, ErrorKind, RepositoryError};
    use crate::domain::shared::value_objects::Caller;
    use crate::domain::sweet::repository::MockSweetRepository;
    use crate::test_support::{admin, customer, mock_logger, sweet_fixture};
    use proptest::prelude::*;

    fn repo_adding_to(sweet: Sweet) -> MockSweetRepository {
        let mut mock_repo = MockSweetRepository::new();
        mock_repo
            .expect_increment_stock()
            .returning(move |_, quantity| {
                let mut updated = sweet.clone();
                Ok(updated.quantity.checked_add(quantity).map(|stock| {
                    updated.quantity = stock;
                    updated
                }))
            });
        mock_repo
    }

    fn restock(caller: Caller, id: EntityId, quantity: i32) -> RestockSweetParams {
        RestockSweetParams {
            caller,
            id: id.to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn should_increase_stock() {
        let sweet = sweet_fixture("Marshmallow", "0.80", 5);
        let id = sweet.id;
        let use_case = RestockSweetUseCaseImpl {
            repository: Arc::new(repo_adding_to(sweet)),
            logger: mock_logger(),
        };

        let updated = use_case.execute(restock(admin(), id, 20)).await.unwrap();

        assert_eq!(updated.quantity, 25);
    }

    #[tokio::test]
    async fn should_reject_restock_for_non_admin() {
        let mut mock_repo = MockSweetRepository::new();
        mock_repo.expect_increment_stock().never();

        let use_case = RestockSweetUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(restock(customer(), EntityId::generate(), 5))
            .await;

        assert!(matches!(result.unwrap_err(), SweetError::Forbidden));
    }

    #[tokio::test]
    async fn should_reject_non_positive_restock() {
        let use_case = RestockSweetUseCaseImpl {
            repository: Arc::new(MockSweetRepository::new()),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(restock(admin(), EntityId::generate(), 0))
            .await;

        assert!(matches!(result.unwrap_err(), SweetError::QuantityNotPositive));
    }

    #[tokio::test]
    async fn should_reject_restock_beyond_stock_limit() {
        let sweet = sweet_fixture("Marshmallow", "0.80", i32::MAX - 1);
        let id = sweet.id;
        let current = sweet.clone();
        let mut mock_repo = repo_adding_to(sweet);
        mock_repo
            .expect_get_by_id()
            .times(1)
            .returning(move |_| Ok(current.clone()));

        let use_case = RestockSweetUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case.execute(restock(admin(), id, 2)).await;

        let error = result.unwrap_err();
        assert!(matches!(error, SweetError::StockTooLarge));
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_sweet() {
        let mut mock_repo = MockSweetRepository::new();
        mock_repo
            .expect_increment_stock()
            .returning(|_, _| Ok(None));
        mock_repo
            .expect_get_by_id()
            .returning(|_| Err(RepositoryError::NotFound));

        let use_case = RestockSweetUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(restock(admin(), EntityId::generate(), 3))
            .await;

        assert!(matches!(result.unwrap_err(), SweetError::NotFound));
    }

    proptest! {
        #[test]
        fn restock_adds_exactly_the_requested_units(stock in 0i32..100_000, quantity in 1i32..100_000) {
            let sweet = sweet_fixture("Nougat", "2.00", stock);
            let id = sweet.id;
            let use_case = RestockSweetUseCaseImpl {
                repository: Arc::new(repo_adding_to(sweet)),
                logger: mock_logger(),
            };

            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let updated = runtime.block_on(use_case.execute(restock(admin(), id, quantity))).unwrap();

            prop_assert_eq!(updated.quantity, stock + quantity);
        }
    }
}
