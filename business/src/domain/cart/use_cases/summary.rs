use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSummary;
use crate::domain::shared::value_objects::UserId;

pub struct GetCartSummaryParams {
    pub user_id: UserId,
}

#[async_trait]
pub trait GetCartSummaryUseCase: Send + Sync {
    async fn execute(&self, params: GetCartSummaryParams) -> Result<CartSummary, CartError>;
}
