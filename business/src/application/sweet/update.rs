use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::shared::entity_id::EntityId;
use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::Sweet;
use crate::domain::sweet::repository::SweetRepository;
use crate::domain::sweet::use_cases::update::{UpdateSweetParams, UpdateSweetUseCase};

pub struct UpdateSweetUseCaseImpl {
    pub repository: Arc<dyn SweetRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateSweetUseCase for UpdateSweetUseCaseImpl {
    async fn execute(&self, params: UpdateSweetParams) -> Result<Sweet, SweetError> {
        if !params.caller.is_admin() {
            self.logger.warn(&format!(
                "User {} is not allowed to update sweets",
                params.caller.user_id
            ));
            return Err(SweetError::Forbidden);
        }

        let id = EntityId::parse(&params.id)?;
        let changes = params.changes.validated()?;

        self.logger.info(&format!("Updating sweet: {}", id));

        // Nothing to write: still report whether the sweet exists
        if changes.is_empty() {
            return self
                .repository
                .get_by_id(id)
                .await
                .map_err(SweetError::from_lookup);
        }

        let updated = self
            .repository
            .update(id, &changes)
            .await
            .map_err(SweetError::from_lookup)?;

        self.logger.info(&format!("Sweet updated: {}", updated.id));
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::sweet::model::SweetChanges;
    use crate::domain::sweet::repository::MockSweetRepository;
    use crate::test_support::{admin, customer, dec, mock_logger, sweet_fixture};

    #[tokio::test]
    async fn should_apply_partial_changes() {
        let sweet = sweet_fixture("Chocolate Bar", "2.50", 100);
        let id = sweet.id;
        let mut mock_repo = MockSweetRepository::new();
        mock_repo
            .expect_update()
            .withf(|_, changes: &SweetChanges| {
                changes.price == Some(dec("3.00")) && changes.name.is_none()
            })
            .returning(move |_, changes| {
                let mut updated = sweet.clone();
                updated.price = changes.price.unwrap_or(updated.price);
                Ok(updated)
            });

        let use_case = UpdateSweetUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(UpdateSweetParams {
                caller: admin(),
                id: id.to_string(),
                changes: SweetChanges {
                    price: Some(dec("3")),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(result.price, dec("3.00"));
        assert_eq!(result.name, "Chocolate Bar");
    }

    #[tokio::test]
    async fn should_reject_update_for_non_admin() {
        let mut mock_repo = MockSweetRepository::new();
        mock_repo.expect_update().never();

        let use_case = UpdateSweetUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(UpdateSweetParams {
                caller: customer(),
                id: "507f1f77bcf86cd799439011".to_string(),
                changes: SweetChanges {
                    price: Some(dec("3")),
                    ..Default::default()
                },
            })
            .await;

        assert!(matches!(result.unwrap_err(), SweetError::Forbidden));
    }

    #[tokio::test]
    async fn should_reject_negative_quantity_without_writing() {
        let mut mock_repo = MockSweetRepository::new();
        mock_repo.expect_update().never();

        let use_case = UpdateSweetUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(UpdateSweetParams {
                caller: admin(),
                id: "507f1f77bcf86cd799439011".to_string(),
                changes: SweetChanges {
                    quantity: Some(-4),
                    ..Default::default()
                },
            })
            .await;

        assert!(matches!(result.unwrap_err(), SweetError::QuantityNegative));
    }

    #[tokio::test]
    async fn should_reject_malformed_id() {
        let use_case = UpdateSweetUseCaseImpl {
            repository: Arc::new(MockSweetRepository::new()),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(UpdateSweetParams {
                caller: admin(),
                id: "123".to_string(),
                changes: SweetChanges::default(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), SweetError::InvalidId));
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_sweet() {
        let mut mock_repo = MockSweetRepository::new();
        mock_repo
            .expect_update()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let use_case = UpdateSweetUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(UpdateSweetParams {
                caller: admin(),
                id: "507f1f77bcf86cd799439011".to_string(),
                changes: SweetChanges {
                    name: Some("Updated".to_string()),
                    ..Default::default()
                },
            })
            .await;

        assert!(matches!(result.unwrap_err(), SweetError::NotFound));
    }

    #[tokio::test]
    async fn should_return_current_sweet_for_empty_update() {
        let sweet = sweet_fixture("Toffee", "1.00", 3);
        let id = sweet.id;
        let mut mock_repo = MockSweetRepository::new();
        mock_repo.expect_update().never();
        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(sweet.clone()));

        let use_case = UpdateSweetUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(UpdateSweetParams {
                caller: admin(),
                id: id.to_string(),
                changes: SweetChanges::default(),
            })
            .await
            .unwrap();

        assert_eq!(result.id, id);
    }
}
