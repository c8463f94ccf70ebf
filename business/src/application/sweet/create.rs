use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::sweet::errors::SweetError;
use crate::domain::sweet::model::{NewSweetProps, Sweet};
use crate::domain::sweet::repository::SweetRepository;
use crate::domain::sweet::use_cases::create::{CreateSweetParams, CreateSweetUseCase};

pub struct CreateSweetUseCaseImpl {
    pub repository: Arc<dyn SweetRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateSweetUseCase for CreateSweetUseCaseImpl {
    async fn execute(&self, params: CreateSweetParams) -> Result<Sweet, SweetError> {
        if !params.caller.is_admin() {
            self.logger.warn(&format!(
                "User {} is not allowed to create sweets",
                params.caller.user_id
            ));
            return Err(SweetError::Forbidden);
        }

        self.logger.info(&format!("Creating sweet: {}", params.name));

        let sweet = Sweet::new(NewSweetProps {
            name: params.name,
            category: params.category,
            price: params.price,
            quantity: params.quantity,
            description: params.description,
            image_url: params.image_url,
        })?;

        self.repository.save(&sweet).await?;

        self.logger
            .info(&format!("Sweet created with id: {}", sweet.id));
        Ok(sweet)
    }
}
