use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartView;
use crate::domain::shared::value_objects::UserId;

pub struct AddCartItemParams {
    pub user_id: UserId,
    pub sweet_id: String,
    pub quantity: i32,
}

#[async_trait]
pub trait AddCartItemUseCase: Send + Sync {
    async fn execute(&self, params: AddCartItemParams) -> Result<CartView, CartError>;
}
