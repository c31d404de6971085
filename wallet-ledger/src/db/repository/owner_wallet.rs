//! Owner Wallet Repository
//!
//! The wallet row and the order marker that guards it always commit in the
//! same transaction, so duplicate event deliveries can never both pass the
//! marker check and both mutate the wallet.

use super::{MutationOutcome, RepoResult};
use shared::models::{OrderType, OwnerWallet};
use sqlx::SqlitePool;

pub async fn find(pool: &SqlitePool, owner_id: &str) -> RepoResult<Option<OwnerWallet>> {
    let row = sqlx::query_as::<_, OwnerWallet>("SELECT * FROM owner_wallet WHERE owner_id = ?")
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Credit `amount` to the owner's wallet for a newly created order.
///
/// Claims the order's `already_added` marker and applies the wallet delta
/// (total + matching inside/outside bucket) in one transaction. The wallet
/// row is created on first credit (merge semantics).
pub async fn credit_for_order(
    pool: &SqlitePool,
    order_id: &str,
    owner_id: &str,
    order_type: OrderType,
    amount: f64,
) -> RepoResult<MutationOutcome> {
    let mut tx = pool.begin().await?;

    let claimed = sqlx::query("UPDATE orders SET already_added = 1 WHERE id = ? AND already_added = 0")
        .bind(order_id)
        .execute(&mut *tx)
        .await?;
    if claimed.rows_affected() == 0 {
        return Ok(MutationOutcome::AlreadyApplied);
    }

    apply_delta(&mut tx, owner_id, order_type, amount).await?;

    tx.commit().await?;
    Ok(MutationOutcome::Applied)
}

/// Reverse a previously applied credit when the order is cancelled.
///
/// Claims the `cancel_processed` marker; only fires if the order was
/// actually credited (`already_added`) and not yet reversed.
pub async fn debit_for_order(
    pool: &SqlitePool,
    order_id: &str,
    owner_id: &str,
    order_type: OrderType,
    amount: f64,
) -> RepoResult<MutationOutcome> {
    let mut tx = pool.begin().await?;

    let claimed = sqlx::query(
        "UPDATE orders SET cancel_processed = 1 WHERE id = ? AND already_added = 1 AND cancel_processed = 0",
    )
    .bind(order_id)
    .execute(&mut *tx)
    .await?;
    if claimed.rows_affected() == 0 {
        return Ok(MutationOutcome::AlreadyApplied);
    }

    apply_delta(&mut tx, owner_id, order_type, -amount).await?;

    tx.commit().await?;
    Ok(MutationOutcome::Applied)
}

async fn apply_delta(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    owner_id: &str,
    order_type: OrderType,
    delta: f64,
) -> RepoResult<()> {
    let (inside_delta, outside_delta) = match order_type {
        OrderType::Inside => (delta, 0.0),
        OrderType::Outside => (0.0, delta),
    };
    sqlx::query(
        "INSERT INTO owner_wallet (owner_id, inside_total, outside_total, total_amount, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(owner_id) DO UPDATE SET
             inside_total = inside_total + excluded.inside_total,
             outside_total = outside_total + excluded.outside_total,
             total_amount = total_amount + excluded.total_amount,
             updated_at = excluded.updated_at",
    )
    .bind(owner_id)
    .bind(inside_delta)
    .bind(outside_delta)
    .bind(delta)
    .bind(shared::util::now_rfc3339())
    .execute(&mut **tx)
    .await?;
    Ok(())
}
