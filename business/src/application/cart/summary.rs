use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartSummary;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::summary::{GetCartSummaryParams, GetCartSummaryUseCase};
use crate::domain::cart::value_objects::TaxRate;
use crate::domain::logger::Logger;

pub struct GetCartSummaryUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub tax_rate: TaxRate,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCartSummaryUseCase for GetCartSummaryUseCaseImpl {
    async fn execute(&self, params: GetCartSummaryParams) -> Result<CartSummary, CartError> {
        self.logger
            .debug(&format!("Computing cart summary for user: {}", params.user_id));

        let summary = self
            .repository
            .find_active(&params.user_id)
            .await?
            .map(|cart| cart.summary(self.tax_rate))
            .unwrap_or_else(CartSummary::empty);
        Ok(summary)
    }
}
