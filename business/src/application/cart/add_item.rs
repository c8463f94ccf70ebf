use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{Cart, CartView};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::add_item::{AddCartItemParams, AddCartItemUseCase};
use crate::domain::cart::value_objects::TaxRate;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::shared::entity_id::EntityId;
use crate::domain::sweet::repository::SweetRepository;

pub struct AddCartItemUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub sweet_repository: Arc<dyn SweetRepository>,
    pub tax_rate: TaxRate,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddCartItemUseCase for AddCartItemUseCaseImpl {
    async fn execute(&self, params: AddCartItemParams) -> Result<CartView, CartError> {
        let sweet_id = EntityId::parse(&params.sweet_id)?;
        if params.quantity <= 0 {
            return Err(CartError::QuantityNotPositive);
        }

        self.logger.info(&format!(
            "Adding {} of sweet {} to cart of user {}",
            params.quantity, sweet_id, params.user_id
        ));

        let sweet = self
            .sweet_repository
            .get_by_id(sweet_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CartError::SweetNotFound,
                other => CartError::Repository(other),
            })?;

        // A checkout may complete the cart between the read and the write.
        // The second attempt then lands in the user's next cart.
        let mut attempts_left = 2;
        loop {
            attempts_left -= 1;
            let mut cart = self
                .repository
                .get_or_create_active(&Cart::new(params.user_id.clone()))
                .await?;
            let line = cart.add_item(&sweet, params.quantity)?;

            match self
                .repository
                .merge_item(cart.id, &line, params.quantity)
                .await
            {
                Ok(()) => {
                    self.logger.info(&format!(
                        "Cart {} line {} now holds {}",
                        cart.id, line.id, line.quantity
                    ));
                    return Ok(CartView::of(Some(cart), self.tax_rate));
                }
                Err(RepositoryError::NotFound) if attempts_left > 0 => {
                    self.logger.warn(&format!(
                        "Cart {} was closed while adding sweet {}, retrying",
                        cart.id, sweet.id
                    ));
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::cart::model::CartItem;
    use crate::domain::cart::repository::MockCartRepository;
    use crate::domain::shared::value_objects::UserId;
    use crate::domain::sweet::model::Sweet;
    use crate::domain::sweet::repository::MockSweetRepository;
    use crate::test_support::{dec, mock_logger, sweet_fixture};

    fn sweets_returning(sweet: Sweet) -> MockSweetRepository {
        let mut mock = MockSweetRepository::new();
        mock.expect_get_by_id()
            .returning(move |_| Ok(sweet.clone()));
        mock
    }

    fn params(sweet_id: EntityId, quantity: i32) -> AddCartItemParams {
        AddCartItemParams {
            user_id: UserId::new("customer-1"),
            sweet_id: sweet_id.to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn should_create_cart_and_line_on_first_add() {
        let sweet = sweet_fixture("Chocolate Bar", "2.50", 100);
        let sweet_id = sweet.id;
        let mut carts = MockCartRepository::new();
        carts
            .expect_get_or_create_active()
            .times(1)
            .returning(|candidate| Ok(candidate.clone()));
        carts
            .expect_merge_item()
            .withf(move |_, item: &CartItem, added: &i32| {
                item.sweet_id == sweet_id
                    && item.quantity == 3
                    && item.price_at_time == dec("2.50")
                    && *added == 3
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let use_case = AddCartItemUseCaseImpl {
            repository: Arc::new(carts),
            sweet_repository: Arc::new(sweets_returning(sweet)),
            tax_rate: TaxRate::default(),
            logger: mock_logger(),
        };

        let view = use_case.execute(params(sweet_id, 3)).await.unwrap();

        let cart = view.cart.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(view.summary.item_count, 3);
        assert_eq!(view.summary.subtotal, dec("7.50"));
    }

    #[tokio::test]
    async fn should_merge_into_existing_line_keeping_snapshot_price() {
        let original = sweet_fixture("Chocolate Bar", "2.50", 100);
        let sweet_id = original.id;
        let mut existing_cart = Cart::new(UserId::new("customer-1"));
        existing_cart.add_item(&original, 2).unwrap();
        let existing_line_id = existing_cart.items[0].id;

        let mut repriced = original.clone();
        repriced.price = dec("4.00");

        let mut carts = MockCartRepository::new();
        carts
            .expect_get_or_create_active()
            .returning(move |_| Ok(existing_cart.clone()));
        carts
            .expect_merge_item()
            .withf(move |_, item: &CartItem, added: &i32| {
                item.id == existing_line_id && *added == 3
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let use_case = AddCartItemUseCaseImpl {
            repository: Arc::new(carts),
            sweet_repository: Arc::new(sweets_returning(repriced)),
            tax_rate: TaxRate::default(),
            logger: mock_logger(),
        };

        let view = use_case.execute(params(sweet_id, 3)).await.unwrap();

        let cart = view.cart.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.items[0].price_at_time, dec("2.50"));
    }

    #[tokio::test]
    async fn should_retry_in_new_cart_when_cart_closes_mid_add() {
        let sweet = sweet_fixture("Chocolate Bar", "2.50", 100);
        let sweet_id = sweet.id;
        let closed = Cart::new(UserId::new("customer-1"));
        let closed_id = closed.id;

        let lookups = AtomicUsize::new(0);
        let mut carts = MockCartRepository::new();
        carts
            .expect_get_or_create_active()
            .times(2)
            .returning(move |candidate| {
                if lookups.fetch_add(1, Ordering::SeqCst) == 0 {
                    Ok(closed.clone())
                } else {
                    Ok(candidate.clone())
                }
            });
        carts
            .expect_merge_item()
            .times(2)
            .returning(move |cart_id, _, _| {
                if cart_id == closed_id {
                    Err(RepositoryError::NotFound)
                } else {
                    Ok(())
                }
            });

        let use_case = AddCartItemUseCaseImpl {
            repository: Arc::new(carts),
            sweet_repository: Arc::new(sweets_returning(sweet)),
            tax_rate: TaxRate::default(),
            logger: mock_logger(),
        };

        let view = use_case.execute(params(sweet_id, 2)).await.unwrap();

        let cart = view.cart.unwrap();
        assert_ne!(cart.id, closed_id);
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[tokio::test]
    async fn should_give_up_after_second_closed_cart() {
        let sweet = sweet_fixture("Chocolate Bar", "2.50", 100);
        let sweet_id = sweet.id;
        let mut carts = MockCartRepository::new();
        carts
            .expect_get_or_create_active()
            .times(2)
            .returning(|candidate| Ok(candidate.clone()));
        carts
            .expect_merge_item()
            .times(2)
            .returning(|_, _, _| Err(RepositoryError::NotFound));

        let use_case = AddCartItemUseCaseImpl {
            repository: Arc::new(carts),
            sweet_repository: Arc::new(sweets_returning(sweet)),
            tax_rate: TaxRate::default(),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(sweet_id, 1)).await;

        assert!(matches!(
            result.unwrap_err(),
            CartError::Repository(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn should_reject_non_positive_quantity() {
        let mut sweets = MockSweetRepository::new();
        sweets.expect_get_by_id().never();

        let use_case = AddCartItemUseCaseImpl {
            repository: Arc::new(MockCartRepository::new()),
            sweet_repository: Arc::new(sweets),
            tax_rate: TaxRate::default(),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(EntityId::generate(), 0)).await;

        assert!(matches!(result.unwrap_err(), CartError::QuantityNotPositive));
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_sweet() {
        let mut sweets = MockSweetRepository::new();
        sweets
            .expect_get_by_id()
            .returning(|_| Err(RepositoryError::NotFound));
        let mut carts = MockCartRepository::new();
        carts.expect_get_or_create_active().never();

        let use_case = AddCartItemUseCaseImpl {
            repository: Arc::new(carts),
            sweet_repository: Arc::new(sweets),
            tax_rate: TaxRate::default(),
            logger: mock_logger(),
        };

        let result = use_case.execute(params(EntityId::generate(), 1)).await;

        assert!(matches!(result.unwrap_err(), CartError::SweetNotFound));
    }

    #[tokio::test]
    async fn should_reject_malformed_sweet_id() {
        let use_case = AddCartItemUseCaseImpl {
            repository: Arc::new(MockCartRepository::new()),
            sweet_repository: Arc::new(MockSweetRepository::new()),
            tax_rate: TaxRate::default(),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(AddCartItemParams {
                user_id: UserId::new("customer-1"),
                sweet_id: "bad".to_string(),
                quantity: 1,
            })
            .await;

        assert!(matches!(result.unwrap_err(), CartError::InvalidId));
    }
}
