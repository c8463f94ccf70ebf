/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    #[error("repository.persistence")]
    Persistence,
    #[error("repository.duplicated")]
    Duplicated,
    #[error("repository.database_error")]
    DatabaseError,
}

impl RepositoryError {
    pub fn not_found() -> Self {
        RepositoryError::NotFound
    }
    pub fn persistence() -> Self {
        RepositoryError::Persistence
    }
    pub fn duplicated() -> Self {
        RepositoryError::Duplicated
    }
    pub fn database_error() -> Self {
        RepositoryError::DatabaseError
    }
}

/// Machine-checkable category shared by every domain error.
///
/// The presentation layer maps a kind to a transport status in one place,
/// so individual routes never decide status codes on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    InvalidId,
    NotFound,
    Forbidden,
    Unauthenticated,
    InsufficientStock,
    Internal,
}

impl ErrorKind {
    /// Stable name exposed to clients alongside the error code.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::InvalidId => "InvalidId",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::Unauthenticated => "Unauthenticated",
            ErrorKind::InsufficientStock => "InsufficientStock",
            ErrorKind::Internal => "InternalError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Implemented by every aggregate error so callers can branch on the kind
/// without matching each variant.
pub trait DomainError: std::error::Error {
    fn kind(&self) -> ErrorKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expose_stable_kind_names() {
        assert_eq!(ErrorKind::Validation.name(), "ValidationError");
        assert_eq!(ErrorKind::InsufficientStock.to_string(), "InsufficientStock");
        assert_eq!(ErrorKind::Internal.name(), "InternalError");
    }

    #[test]
    fn should_render_repository_errors_as_codes() {
        assert_eq!(RepositoryError::not_found().to_string(), "repository.not_found");
        assert_eq!(
            RepositoryError::database_error().to_string(),
            "repository.database_error"
        );
    }
}
