use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::entity_id::EntityId;

use super::model::{Sweet, SweetChanges};
use super::value_objects::SweetSearch;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SweetRepository: Send + Sync {
    /// All sweets, newest first.
    async fn get_all(&self) -> Result<Vec<Sweet>, RepositoryError>;
    async fn get_page(&self, offset: i64, limit: i64) -> Result<Vec<Sweet>, RepositoryError>;
    async fn count(&self) -> Result<i64, RepositoryError>;
    async fn search(&self, search: &SweetSearch) -> Result<Vec<Sweet>, RepositoryError>;
    async fn get_by_id(&self, id: EntityId) -> Result<Sweet, RepositoryError>;
    async fn save(&self, sweet: &Sweet) -> Result<(), RepositoryError>;
    /// Applies the present fields in a single statement. `NotFound` when absent.
    async fn update(&self, id: EntityId, changes: &SweetChanges) -> Result<Sweet, RepositoryError>;
    /// Removes the sweet and returns it. `NotFound` when absent.
    async fn delete(&self, id: EntityId) -> Result<Sweet, RepositoryError>;
    /// Decrements stock only if at least `quantity` units remain.
    /// Returns `None` when the condition does not hold or the sweet is gone.
    async fn decrement_stock(
        &self,
        id: EntityId,
        quantity: i32,
    ) -> Result<Option<Sweet>, RepositoryError>;
    /// Increments stock unless the result would exceed `i32::MAX`.
    /// Returns `None` when the condition does not hold or the sweet is gone.
    async fn increment_stock(
        &self,
        id: EntityId,
        quantity: i32,
    ) -> Result<Option<Sweet>, RepositoryError>;
}
