//! Data models
//!
//! Shared between the ledger core and application surfaces (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.

pub mod order;
pub mod wallet;

// Re-exports
pub use order::*;
pub use wallet::*;
