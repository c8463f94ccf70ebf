use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::order::Order;
use crate::domain::shared::value_objects::UserId;

pub struct CheckoutParams {
    pub user_id: UserId,
}

#[async_trait]
pub trait CheckoutUseCase: Send + Sync {
    async fn execute(&self, params: CheckoutParams) -> Result<Order, CartError>;
}
