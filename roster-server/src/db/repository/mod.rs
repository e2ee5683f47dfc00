//! Repository Module
//!
//! Query and mutation operations over the SQLite tables. Repositories take
//! an explicit pool handle; there is no global session.

pub mod employee;

// Re-exports
pub use employee::EmployeeRepository;

use shared::error::AppError;
use shared::models::EmployeeValidationError;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Employee {0} not found")]
    NotFound(i64),

    #[error("Validation error: {0}")]
    Validation(#[from] EmployeeValidationError),

    /// Database unreachable (pool exhausted/closed, I/O failure)
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_) => RepoError::Unavailable(err.to_string()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => AppError::employee_not_found(id),
            RepoError::Validation(e) => e.into(),
            RepoError::Unavailable(msg) => {
                tracing::error!(error = %msg, "Database unavailable");
                AppError::database_unavailable()
            }
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                AppError::database("Database error")
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
