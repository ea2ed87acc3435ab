//! Domain error taxonomy shared by every layer.
//!
//! The HTTP boundary maps each variant to a status code; storage and internal
//! details only ever reach the logs.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur in Ledgerly operations.
#[derive(Debug, Error)]
pub enum DomainError {
    // ========== Validation Errors ==========
    /// Amount is not positive, too large, or finer than cents.
    #[error("amount must be greater than zero, at most 999999999999.99, with at most two decimals")]
    InvalidAmount,

    /// Expense category is empty.
    #[error("category is mandatory")]
    MissingCategory,

    /// Debit exceeds the current cash box balance.
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Expense links to a petty cash transaction that does not exist.
    #[error("linked petty cash transaction not found")]
    LinkedTransactionNotFound(Uuid),

    // ========== Authentication & Authorization ==========
    /// Unknown username or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, badly signed, or expired session token.
    #[error("authentication required")]
    Unauthenticated,

    /// The caller's role does not grant the action.
    #[error("forbidden")]
    Forbidden,

    /// Registration with a username that already exists.
    #[error("username already exists")]
    UsernameTaken,

    // ========== Infrastructure ==========
    /// Underlying persistence failure.
    #[error("storage failure")]
    StorageFailure(String),

    /// Internal error.
    #[error("internal error")]
    Internal(String),
}

impl DomainError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount => "invalid_amount",
            Self::MissingCategory => "missing_category",
            Self::InsufficientFunds => "insufficient_funds",
            Self::LinkedTransactionNotFound(_) => "linked_transaction_not_found",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::UsernameTaken => "username_taken",
            Self::StorageFailure(_) => "storage_failure",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::InvalidAmount
            | Self::MissingCategory
            | Self::InsufficientFunds
            | Self::LinkedTransactionNotFound(_) => 400,

            // 401 Unauthorized
            Self::InvalidCredentials | Self::Unauthenticated => 401,

            // 403 Forbidden
            Self::Forbidden => 403,

            // 409 Conflict
            Self::UsernameTaken => 409,

            // 500 Internal Server Error
            Self::StorageFailure(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns true if the error carries details that must stay in the logs.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::StorageFailure(_) | Self::Internal(_))
    }
}
