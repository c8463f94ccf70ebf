use async_trait::async_trait;

use crate::domain::shared::value_objects::Caller;
use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::Sweet;

pub struct PurchaseSweetParams {
    pub caller: Caller,
    pub id: String,
    pub quantity: i32,
}

#[async_trait]
pub trait PurchaseSweetUseCase: Send + Sync {
    async fn execute(&self, params: PurchaseSweetParams) -> Result<Sweet, SweetError>;
}
