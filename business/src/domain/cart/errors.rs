use crate::domain::errors::{DomainError, ErrorKind, RepositoryError};
use crate::domain::shared::entity_id::{EntityId, InvalidEntityId};

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("cart.quantity_not_positive")]
    QuantityNotPositive,
    #[error("cart.quantity_too_large")]
    QuantityTooLarge,
    #[error("cart.invalid_id")]
    InvalidId,
    #[error("cart.sweet_not_found")]
    SweetNotFound,
    #[error("cart.item_not_found")]
    ItemNotFound,
    #[error("cart.empty")]
    Empty,
    #[error("cart.insufficient_stock")]
    InsufficientStock { sweet_id: EntityId },
    #[error("repository.persistence")]
    Repository(#[from] RepositoryError),
}

impl From<InvalidEntityId> for CartError {
    fn from(_: InvalidEntityId) -> Self {
        CartError::InvalidId
    }
}

impl DomainError for CartError {
    fn kind(&self) -> ErrorKind {
        match self {
            CartError::QuantityNotPositive | CartError::QuantityTooLarge | CartError::Empty => {
                ErrorKind::Validation
            }
            CartError::InvalidId => ErrorKind::InvalidId,
            CartError::SweetNotFound | CartError::ItemNotFound => ErrorKind::NotFound,
            CartError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            CartError::Repository(_) => ErrorKind::Internal,
        }
    }
}
