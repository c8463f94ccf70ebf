use async_trait::async_trait;

use crate::domain::shared::value_objects::Caller;
use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::{Sweet, SweetChanges};

pub struct UpdateSweetParams {
    pub caller: Caller,
    pub id: String,
    pub changes: SweetChanges,
}

#[async_trait]
pub trait UpdateSweetUseCase: Send + Sync {
    async fn execute(&self, params: UpdateSweetParams) -> Result<Sweet, SweetError>;
}
