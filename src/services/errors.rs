use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;

/// Error taxonomy surfaced to callers of service layer functions.
///
/// Every variant maps to a distinct user-visible outcome; store-level
/// failures are logged and collapsed into `Internal`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Malformed or out-of-range input.
    #[error("{0}")]
    Validation(String),
    /// Referenced entity absent or not owned by the caller.
    #[error("not found")]
    NotFound,
    /// A unique constraint was violated (e.g. duplicate email).
    #[error("{0}")]
    Conflict(String),
    /// Requested quantity exceeds available stock.
    #[error("insufficient stock")]
    InsufficientStock,
    /// Missing, invalid or expired credentials.
    #[error("unauthorized")]
    Unauthorized,
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict(message) => ServiceError::Conflict(message),
            RepositoryError::InsufficientStock => ServiceError::InsufficientStock,
            RepositoryError::Validation(message) => ServiceError::Validation(message),
            other => {
                log::error!("repository failure: {other}");
                ServiceError::Internal
            }
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
