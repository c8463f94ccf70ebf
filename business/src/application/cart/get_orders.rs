use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::order::Order;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::get_orders::{GetOrdersParams, GetOrdersUseCase};
use crate::domain::logger::Logger;

pub struct GetOrdersUseCaseImpl {
    pub repository: Arc<dyn CartRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetOrdersUseCase for GetOrdersUseCaseImpl {
    async fn execute(&self, params: GetOrdersParams) -> Result<Vec<Order>, CartError> {
        self.logger
            .debug(&format!("Fetching orders for user: {}", params.user_id));

        Ok(self.repository.get_orders(&params.user_id).await?)
    }
}
