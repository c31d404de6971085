//! Wallet Models
//!
//! Owner revenue wallet, customer reward balance, and the append-only
//! customer transaction log.

use serde::{Deserialize, Serialize};

/// Owner wallet — one per merchant, created lazily on first credit.
///
/// Invariant: `total_amount == inside_total + outside_total` (within float
/// tolerance); every mutation applies the same delta to the total and to
/// exactly one bucket inside a single transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OwnerWallet {
    pub owner_id: String,
    pub inside_total: f64,
    pub outside_total: f64,
    pub total_amount: f64,
    /// RFC-3339 UTC timestamp of the last mutation
    pub updated_at: String,
}

/// Customer reward balance — one per customer, created lazily on first grant.
///
/// `pending_*` holds reward amounts granted at placement but not yet
/// confirmed into the spendable `coins`/`rupees` fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CustomerBalance {
    pub user_id: String,
    pub coins: i64,
    pub rupees: f64,
    pub pending_coins: i64,
    pub pending_rupees: f64,
}

/// Customer profile markers consumed by the reward policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CustomerProfile {
    pub user_id: String,
    pub first_order_done: bool,
}

/// Audit record direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum TxnKind {
    Added,
    Deducted,
}

/// Append-only audit record for customer balance movements.
///
/// `amount` is the human-readable signed string shown in the app
/// ("+12 Coins", "-₹5"); never parsed back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WalletTransaction {
    pub id: i64,
    pub user_id: String,
    #[serde(rename = "type")]
    pub txn_type: TxnKind,
    pub amount: String,
    pub reason: String,
    pub date: i64,
}
