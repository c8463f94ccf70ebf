use async_trait::async_trait;

use crate::domain::shared::value_objects::Caller;
use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::Sweet;

pub struct DeleteSweetParams {
    pub caller: Caller,
    pub id: String,
}

#[async_trait]
pub trait DeleteSweetUseCase: Send + Sync {
    async fn execute(&self, params: DeleteSweetParams) -> Result<Sweet, SweetError>;
}
