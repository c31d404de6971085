//! Customer Balance Repository
//!
//! The pending bucket is an aggregate across the customer's open orders,
//! not a per-order ledger; settle moves the whole bucket, revoke zeroes it.
//! Each entry point claims the order's `reward_status` in the same
//! transaction as the balance mutation, which is what makes re-delivered
//! confirm/cancel events no-ops.

use super::RepoResult;
use shared::models::CustomerBalance;
use sqlx::SqlitePool;

/// Pending amounts captured before a settle/revoke mutation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingAmounts {
    pub coins: i64,
    pub rupees: f64,
}

pub async fn find(pool: &SqlitePool, user_id: &str) -> RepoResult<Option<CustomerBalance>> {
    let row = sqlx::query_as::<_, CustomerBalance>("SELECT * FROM customer_balance WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Record a freshly drawn reward as pending.
///
/// One transaction: merge the pending amounts into the balance row
/// (creating it with zeroed confirmed fields if absent), attach the reward
/// to the order, and mark the customer's first-order bonus as used.
pub async fn grant_pending(
    pool: &SqlitePool,
    order_id: &str,
    user_id: &str,
    coins: i64,
    rupees: f64,
    first_order_applied: bool,
) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO customer_balance (user_id, coins, rupees, pending_coins, pending_rupees)
         VALUES (?1, 0, 0, ?2, ?3)
         ON CONFLICT(user_id) DO UPDATE SET
             pending_coins = pending_coins + excluded.pending_coins,
             pending_rupees = pending_rupees + excluded.pending_rupees",
    )
    .bind(user_id)
    .bind(coins)
    .bind(rupees)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "UPDATE orders SET reward_coins = ?1, reward_rupees = ?2, reward_status = 'pending', first_order_applied = ?3 WHERE id = ?4",
    )
    .bind(coins)
    .bind(rupees)
    .bind(first_order_applied)
    .bind(order_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO customer_profile (user_id, first_order_done) VALUES (?1, 1)
         ON CONFLICT(user_id) DO UPDATE SET first_order_done = 1",
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

/// Move the pending bucket into the confirmed fields.
///
/// Claims `reward_status` pending → confirmed; returns the amounts that
/// were pending, or `None` when there was nothing to settle (no balance
/// row, or the reward already left pending).
pub async fn settle_pending(
    pool: &SqlitePool,
    order_id: &str,
    user_id: &str,
) -> RepoResult<Option<PendingAmounts>> {
    let mut tx = pool.begin().await?;

    let Some((coins, rupees)) = pending_of(&mut tx, user_id).await? else {
        return Ok(None);
    };

    let claimed = sqlx::query(
        "UPDATE orders SET reward_status = 'confirmed' WHERE id = ? AND reward_status = 'pending'",
    )
    .bind(order_id)
    .execute(&mut *tx)
    .await?;
    if claimed.rows_affected() == 0 {
        return Ok(None);
    }

    sqlx::query(
        "UPDATE customer_balance SET coins = coins + pending_coins, rupees = rupees + pending_rupees, pending_coins = 0, pending_rupees = 0 WHERE user_id = ?",
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some(PendingAmounts { coins, rupees }))
}

/// Zero the pending bucket without touching the confirmed fields.
///
/// Claims `reward_status` pending → cancelled; same return contract as
/// [`settle_pending`].
pub async fn revoke_pending(
    pool: &SqlitePool,
    order_id: &str,
    user_id: &str,
) -> RepoResult<Option<PendingAmounts>> {
    let mut tx = pool.begin().await?;

    let Some((coins, rupees)) = pending_of(&mut tx, user_id).await? else {
        return Ok(None);
    };

    let claimed = sqlx::query(
        "UPDATE orders SET reward_status = 'cancelled' WHERE id = ? AND reward_status = 'pending'",
    )
    .bind(order_id)
    .execute(&mut *tx)
    .await?;
    if claimed.rows_affected() == 0 {
        return Ok(None);
    }

    sqlx::query("UPDATE customer_balance SET pending_coins = 0, pending_rupees = 0 WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(Some(PendingAmounts { coins, rupees }))
}

async fn pending_of(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    user_id: &str,
) -> RepoResult<Option<(i64, f64)>> {
    let row: Option<(i64, f64)> = sqlx::query_as(
        "SELECT pending_coins, pending_rupees FROM customer_balance WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(&mut **tx)
    .await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::order;
    use shared::models::{OrderCreate, RewardStatus};

    async fn seed_order(pool: &SqlitePool, id: &str) {
        order::insert(
            pool,
            OrderCreate {
                id: id.to_string(),
                owner_id: "owner-1".into(),
                user_id: "user-1".into(),
                order_type: "outside".into(),
                subtotal: 120.0,
                delivery_charge: 20.0,
                total: 140.0,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_grant_creates_balance_and_attaches_reward() {
        let pool = DbService::in_memory().await.unwrap().pool;
        seed_order(&pool, "o1").await;

        grant_pending(&pool, "o1", "user-1", 7, 12.0, true).await.unwrap();

        let balance = find(&pool, "user-1").await.unwrap().unwrap();
        assert_eq!(balance.coins, 0);
        assert_eq!(balance.pending_coins, 7);
        assert_eq!(balance.pending_rupees, 12.0);

        let order = order::find_by_id(&pool, "o1").await.unwrap().unwrap();
        let reward = order.reward().unwrap();
        assert_eq!(reward.coins, 7);
        assert_eq!(reward.status, RewardStatus::Pending);
        assert!(order.first_order_applied);
    }

    #[tokio::test]
    async fn test_grant_accumulates_pending_across_orders() {
        let pool = DbService::in_memory().await.unwrap().pool;
        seed_order(&pool, "o1").await;
        seed_order(&pool, "o2").await;

        grant_pending(&pool, "o1", "user-1", 5, 10.0, true).await.unwrap();
        grant_pending(&pool, "o2", "user-1", 3, 2.0, false).await.unwrap();

        let balance = find(&pool, "user-1").await.unwrap().unwrap();
        assert_eq!(balance.pending_coins, 8);
        assert_eq!(balance.pending_rupees, 12.0);
    }

    #[tokio::test]
    async fn test_settle_moves_pending_once() {
        let pool = DbService::in_memory().await.unwrap().pool;
        seed_order(&pool, "o1").await;
        grant_pending(&pool, "o1", "user-1", 7, 12.0, false).await.unwrap();

        let first = settle_pending(&pool, "o1", "user-1").await.unwrap();
        assert_eq!(first, Some(PendingAmounts { coins: 7, rupees: 12.0 }));

        let balance = find(&pool, "user-1").await.unwrap().unwrap();
        assert_eq!(balance.coins, 7);
        assert_eq!(balance.rupees, 12.0);
        assert_eq!(balance.pending_coins, 0);
        assert_eq!(balance.pending_rupees, 0.0);

        // Re-delivered confirm event finds reward_status already advanced
        let second = settle_pending(&pool, "o1", "user-1").await.unwrap();
        assert_eq!(second, None);
        let balance = find(&pool, "user-1").await.unwrap().unwrap();
        assert_eq!(balance.coins, 7);
    }

    #[tokio::test]
    async fn test_revoke_zeroes_pending_and_keeps_confirmed() {
        let pool = DbService::in_memory().await.unwrap().pool;
        seed_order(&pool, "o1").await;
        seed_order(&pool, "o2").await;

        // o1 settled into confirmed, o2 still pending
        grant_pending(&pool, "o1", "user-1", 4, 6.0, false).await.unwrap();
        settle_pending(&pool, "o1", "user-1").await.unwrap();
        grant_pending(&pool, "o2", "user-1", 9, 3.0, false).await.unwrap();

        let revoked = revoke_pending(&pool, "o2", "user-1").await.unwrap();
        assert_eq!(revoked, Some(PendingAmounts { coins: 9, rupees: 3.0 }));

        let balance = find(&pool, "user-1").await.unwrap().unwrap();
        assert_eq!(balance.coins, 4);
        assert_eq!(balance.rupees, 6.0);
        assert_eq!(balance.pending_coins, 0);
        assert_eq!(balance.pending_rupees, 0.0);

        let second = revoke_pending(&pool, "o2", "user-1").await.unwrap();
        assert_eq!(second, None);
    }

    #[tokio::test]
    async fn test_settle_without_balance_row_is_noop() {
        let pool = DbService::in_memory().await.unwrap().pool;
        seed_order(&pool, "o1").await;
        // Reward pending on the order but no balance row exists
        sqlx::query("UPDATE orders SET reward_coins = 3, reward_rupees = 5, reward_status = 'pending' WHERE id = 'o1'")
            .execute(&pool)
            .await
            .unwrap();

        let settled = settle_pending(&pool, "o1", "user-1").await.unwrap();
        assert_eq!(settled, None);

        // reward_status untouched, so a later delivery can still settle
        let order = order::find_by_id(&pool, "o1").await.unwrap().unwrap();
        assert_eq!(order.reward().unwrap().status, RewardStatus::Pending);
    }

    #[tokio::test]
    async fn test_cancel_after_confirm_is_noop() {
        let pool = DbService::in_memory().await.unwrap().pool;
        seed_order(&pool, "o1").await;
        grant_pending(&pool, "o1", "user-1", 7, 12.0, false).await.unwrap();
        settle_pending(&pool, "o1", "user-1").await.unwrap();

        let revoked = revoke_pending(&pool, "o1", "user-1").await.unwrap();
        assert_eq!(revoked, None);
        let balance = find(&pool, "user-1").await.unwrap().unwrap();
        assert_eq!(balance.coins, 7);
        assert_eq!(balance.rupees, 12.0);
    }
}
