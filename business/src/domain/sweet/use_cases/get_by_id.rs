use async_trait::async_trait;

use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::Sweet;

pub struct GetSweetByIdParams {
    pub id: String,
}

#[async_trait]
pub trait GetSweetByIdUseCase: Send + Sync {
    async fn execute(&self, params: GetSweetByIdParams) -> Result<Sweet, SweetError>;
}
