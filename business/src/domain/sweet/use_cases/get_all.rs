use async_trait::async_trait;

use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::Sweet;

#[async_trait]
pub trait GetAllSweetsUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<Sweet>, SweetError>;
}
