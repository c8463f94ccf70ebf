use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::order::Order;
use crate::domain::cart::repository::{CartRepository, CheckoutOutcome};
use crate::domain::cart::use_cases::checkout::{CheckoutParams, CheckoutUseCase};
use crate::domain::cart::value_objects::TaxRate;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;

pub struct CheckoutUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub tax_rate: TaxRate,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CheckoutUseCase for CheckoutUseCaseImpl {
    async fn execute(&self, params: CheckoutParams) -> Result<Order, CartError> {
        let cart = match self.repository.find_active(&params.user_id).await? {
            Some(cart) if !cart.is_empty() => cart,
            _ => return Err(CartError::Empty),
        };

        if let Some(line) = cart.items.iter().find(|item| !item.available) {
            self.logger.warn(&format!(
                "Checkout of cart {} blocked: sweet {} is no longer available",
                cart.id, line.sweet_id
            ));
            return Err(CartError::InsufficientStock {
                sweet_id: line.sweet_id,
            });
        }

        let outcome = self
            .repository
            .checkout(cart.id, self.tax_rate)
            .await
            .map_err(|e| match e {
                // another request completed or emptied this cart first
                RepositoryError::NotFound => CartError::Empty,
                other => CartError::Repository(other),
            })?;

        match outcome {
            CheckoutOutcome::Completed(order) => {
                self.logger.info(&format!(
                    "Cart {} checked out as order {} (total {})",
                    cart.id, order.id, order.summary.total
                ));
                Ok(order)
            }
            CheckoutOutcome::InsufficientStock { sweet_id } => {
                self.logger.warn(&format!(
                    "Checkout of cart {} rolled back: not enough stock for sweet {}",
                    cart.id, sweet_id
                ));
                Err(CartError::InsufficientStock { sweet_id })
            }
        }
    }
}
