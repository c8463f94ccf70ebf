use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use business::domain::errors::RepositoryError;
use business::domain::shared::entity_id::EntityId;
use business::domain::sweet::model::Sweet;

pub const SWEET_COLUMNS: &str =
    "id, name, category, price, quantity, description, image_url, created_at, updated_at";

#[derive(Debug, FromRow)]
pub struct SweetEntity {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SweetEntity {
    pub fn into_domain(self) -> Result<Sweet, RepositoryError> {
        let id = EntityId::parse(&self.id).map_err(|_| {
            tracing::error!(id = %self.id, "Stored sweet has a malformed id");
            RepositoryError::Persistence
        })?;

        Ok(Sweet::from_repository(
            id,
            self.name,
            self.category,
            self.price,
            self.quantity,
            self.description,
            self.image_url,
            self.created_at,
            self.updated_at,
        ))
    }
}

pub fn into_domain_list(entities: Vec<SweetEntity>) -> Result<Vec<Sweet>, RepositoryError> {
    entities.into_iter().map(SweetEntity::into_domain).collect()
}
