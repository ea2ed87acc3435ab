//! Error type shared by the write-side repositories.

use ledgerly_core::DomainError;
use sea_orm::DbErr;

/// Errors returned by repository operations that apply business rules.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A business rule rejected the write.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A stored row could not be interpreted.
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Domain(e) => e,
            RepositoryError::CorruptRow(msg) => Self::Internal(msg),
            RepositoryError::Database(e) => Self::StorageFailure(e.to_string()),
        }
    }
}
