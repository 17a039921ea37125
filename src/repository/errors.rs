use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Failed to obtain a connection from the pool.
    #[error("database pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// Any database failure that is not a recognized constraint violation.
    #[error("database error: {0}")]
    Database(diesel::result::Error),
    /// The referenced entity does not exist (or is not owned by the caller).
    #[error("not found")]
    NotFound,
    /// A unique constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),
    /// A cart mutation would push a line's quantity past the product's stock.
    #[error("insufficient stock")]
    InsufficientStock,
    /// A stored row failed domain type constraints.
    #[error("validation error: {0}")]
    Validation(String),
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => RepositoryError::NotFound,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            ) => RepositoryError::Conflict(info.message().to_string()),
            other => RepositoryError::Database(other),
        }
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        RepositoryError::Validation(err.to_string())
    }
}

/// Convenient alias for results returned from repository methods.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
