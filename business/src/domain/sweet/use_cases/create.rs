use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::shared::value_objects::Caller;
use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::Sweet;

pub struct CreateSweetParams {
    pub caller: Caller,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[async_trait]
pub trait CreateSweetUseCase: Send + Sync {
    async fn execute(&self, params: CreateSweetParams) -> Result<Sweet, SweetError>;
}
