use async_trait::async_trait;

use crate::domain::shared::value_objects::Caller;
use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::Sweet;

pub struct RestockSweetParams {
    pub caller: Caller,
    pub id: String,
    pub quantity: i32,
}

#[async_trait]
pub trait RestockSweetUseCase: Send + Sync {
    async fn execute(&self, params: RestockSweetParams) -> Result<Sweet, SweetError>;
}
