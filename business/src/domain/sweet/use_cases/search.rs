use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::Sweet;

pub struct SearchSweetsParams {
    pub query: Option<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
}

#[async_trait]
pub trait SearchSweetsUseCase: Send + Sync {
    async fn execute(&self, params: SearchSweetsParams) -> Result<Vec<Sweet>, SweetError>;
}
