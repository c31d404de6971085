//! Ledger error types
//!
//! [`RepoError`] covers the repository layer (see `db::repository`);
//! [`LedgerError`] is the service-boundary error handed back to embedding
//! surfaces and the event worker.

use crate::db::repository::RepoError;

/// Service-boundary error
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Invalid(String),
}

impl From<RepoError> for LedgerError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => LedgerError::NotFound(msg),
            RepoError::Validation(msg) => LedgerError::Invalid(msg),
            RepoError::Database(msg) => LedgerError::Database(msg),
        }
    }
}

/// Result type for service-boundary operations
pub type LedgerResult<T> = Result<T, LedgerError>;
