//! Wallet Transaction Repository
//!
//! Append-only audit log of customer balance movements; rows are never
//! updated or deleted.

use super::{RepoError, RepoResult};
use shared::models::{TxnKind, WalletTransaction};
use sqlx::SqlitePool;

pub async fn append(
    pool: &SqlitePool,
    user_id: &str,
    txn_type: TxnKind,
    amount: &str,
    reason: &str,
) -> RepoResult<WalletTransaction> {
    let id = shared::util::snowflake_id();
    let date = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO wallet_transaction (id, user_id, txn_type, amount, reason, date) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(user_id)
    .bind(txn_type)
    .bind(amount)
    .bind(reason)
    .bind(date)
    .execute(pool)
    .await?;

    let row = sqlx::query_as::<_, WalletTransaction>("SELECT * FROM wallet_transaction WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.ok_or_else(|| RepoError::Database("Failed to append wallet transaction".into()))
}

pub async fn list_by_user(pool: &SqlitePool, user_id: &str) -> RepoResult<Vec<WalletTransaction>> {
    let rows = sqlx::query_as::<_, WalletTransaction>(
        "SELECT * FROM wallet_transaction WHERE user_id = ? ORDER BY date DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
