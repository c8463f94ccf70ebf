use async_trait::async_trait;

use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::value_objects::SweetPage;

pub struct GetSweetsPageParams {
    pub page: i64,
    pub limit: i64,
}

#[async_trait]
pub trait GetSweetsPageUseCase: Send + Sync {
    async fn execute(&self, params: GetSweetsPageParams) -> Result<SweetPage, SweetError>;
}
