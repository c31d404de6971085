//! Repository Module
//!
//! Table-scoped operations over the injected SQLite pool. Every
//! marker-gated wallet mutation runs the marker check-and-set and the
//! aggregate update inside one transaction; callers never read-then-write
//! a wallet outside these functions.

pub mod balance;
pub mod customer;
pub mod order;
pub mod owner_wallet;
pub mod transaction;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Outcome of a marker-gated wallet mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The marker was clear; this call applied the mutation
    Applied,
    /// A previous delivery already claimed the marker; nothing changed
    AlreadyApplied,
}
