//! Shared types for the menu-ordering ledger
//!
//! Domain models and small utilities used by the ledger core and the
//! surrounding application surfaces (storefront backend, owner console).

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
