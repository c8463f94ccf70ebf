use crate::domain::errors::{DomainError, ErrorKind, RepositoryError};
use crate::domain::shared::entity_id::InvalidEntityId;

#[derive(Debug, thiserror::Error)]
pub enum SweetError {
    #[error("sweet.name_empty")]
    NameEmpty,
    #[error("sweet.category_empty")]
    CategoryEmpty,
    #[error("sweet.price_negative")]
    PriceNegative,
    #[error("sweet.price_too_large")]
    PriceTooLarge,
    #[error("sweet.quantity_negative")]
    QuantityNegative,
    #[error("sweet.quantity_not_positive")]
    QuantityNotPositive,
    #[error("sweet.stock_too_large")]
    StockTooLarge,
    #[error("sweet.invalid_pagination")]
    InvalidPagination,
    #[error("sweet.invalid_price_range")]
    InvalidPriceRange,
    #[error("sweet.invalid_id")]
    InvalidId,
    #[error("sweet.not_found")]
    NotFound,
    #[error("sweet.insufficient_stock")]
    InsufficientStock,
    #[error("sweet.forbidden")]
    Forbidden,
    #[error("repository.persistence")]
    Repository(#[from] RepositoryError),
}

impl SweetError {
    /// Maps a repository lookup failure, turning a missing row into `NotFound`.
    pub fn from_lookup(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => SweetError::NotFound,
            other => SweetError::Repository(other),
        }
    }
}

impl From<InvalidEntityId> for SweetError {
    fn from(_: InvalidEntityId) -> Self {
        SweetError::InvalidId
    }
}

impl DomainError for SweetError {
    fn kind(&self) -> ErrorKind {
        match self {
            SweetError::NameEmpty
            | SweetError::CategoryEmpty
            | SweetError::PriceNegative
            | SweetError::PriceTooLarge
            | SweetError::QuantityNegative
            | SweetError::QuantityNotPositive
            | SweetError::StockTooLarge
            | SweetError::InvalidPagination
            | SweetError::InvalidPriceRange => ErrorKind::Validation,
            SweetError::InvalidId => ErrorKind::InvalidId,
            SweetError::NotFound => ErrorKind::NotFound,
            SweetError::InsufficientStock => ErrorKind::InsufficientStock,
            SweetError::Forbidden => ErrorKind::Forbidden,
            SweetError::Repository(_) => ErrorKind::Internal,
        }
    }
}
