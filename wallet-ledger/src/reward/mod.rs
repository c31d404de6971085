//! Customer Reward Ledger
//!
//! Three entry points around one small state machine per order
//! (`reward_status`: pending → confirmed | cancelled):
//!
//! - [`grant_on_placement`] — called synchronously by the ordering flow,
//!   exactly once per order. Not idempotent by design; a duplicate call
//!   would double-grant.
//! - [`confirm_reward`] / [`cancel_reward`] — called from the event
//!   dispatcher on status transitions; idempotent because the claim on
//!   `reward_status` happens inside the balance transaction.
//!
//! Audit-log appends happen after the balance transaction commits and are
//! best-effort: a failed append is logged and never rolls back the balance.

pub mod policy;

pub use policy::RewardPolicy;

use crate::db::repository::balance::PendingAmounts;
use crate::db::repository::{RepoError, RepoResult, balance, customer, order, transaction};
use shared::models::{Reward, RewardStatus, TxnKind};
use sqlx::SqlitePool;
use tracing::{debug, error, warn};

/// What a confirm/cancel call did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RewardOutcome {
    Confirmed { coins: i64, rupees: f64 },
    Cancelled { coins: i64, rupees: f64 },
    NoOp,
}

/// Draw and attach a reward to a freshly placed order.
///
/// Returns the drawn amounts for immediate UI feedback. Failure here must
/// not fail the order itself — the caller surfaces "order placed, reward
/// pending" and moves on.
pub async fn grant_on_placement(pool: &SqlitePool, order_id: &str) -> RepoResult<Reward> {
    grant_with_policy(pool, order_id, &RewardPolicy::default()).await
}

pub async fn grant_with_policy(
    pool: &SqlitePool,
    order_id: &str,
    policy: &RewardPolicy,
) -> RepoResult<Reward> {
    let order = order::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {order_id} not found")))?;

    let first_order = !customer::first_order_done(pool, &order.user_id).await?;
    let (coins, rupees) = {
        let mut rng = rand::thread_rng();
        (
            policy.draw_coins(&mut rng),
            policy.draw_rupees(&mut rng, first_order),
        )
    };

    balance::grant_pending(pool, order_id, &order.user_id, coins, rupees, first_order).await?;
    debug!(order_id, coins, rupees, first_order, "reward granted as pending");

    Ok(Reward {
        coins,
        rupees,
        status: RewardStatus::Pending,
    })
}

/// Move the customer's pending reward bucket into the spendable balance.
///
/// Invoked when the order status becomes `confirmed`. Re-delivery no-ops:
/// the second call finds `reward_status` already advanced.
pub async fn confirm_reward(pool: &SqlitePool, order_id: &str) -> RepoResult<RewardOutcome> {
    let Some(order) = order::find_by_id(pool, order_id).await? else {
        warn!(order_id, "confirm_reward on unknown order");
        return Ok(RewardOutcome::NoOp);
    };

    let Some(pending) = balance::settle_pending(pool, order_id, &order.user_id).await? else {
        return Ok(RewardOutcome::NoOp);
    };

    append_audit(pool, &order.user_id, order_id, TxnKind::Added, &pending).await;
    debug!(order_id, coins = pending.coins, rupees = pending.rupees, "reward confirmed");
    Ok(RewardOutcome::Confirmed {
        coins: pending.coins,
        rupees: pending.rupees,
    })
}

/// Clear the customer's pending reward bucket on cancellation.
///
/// The pending fields are an aggregate, not per-order: the whole bucket is
/// zeroed, even when another order of the same customer is still pending
/// (see DESIGN.md, open questions).
pub async fn cancel_reward(pool: &SqlitePool, order_id: &str) -> RepoResult<RewardOutcome> {
    let Some(order) = order::find_by_id(pool, order_id).await? else {
        warn!(order_id, "cancel_reward on unknown order");
        return Ok(RewardOutcome::NoOp);
    };

    let Some(pending) = balance::revoke_pending(pool, order_id, &order.user_id).await? else {
        return Ok(RewardOutcome::NoOp);
    };

    append_audit(pool, &order.user_id, order_id, TxnKind::Deducted, &pending).await;
    debug!(order_id, coins = pending.coins, rupees = pending.rupees, "reward cancelled");
    Ok(RewardOutcome::Cancelled {
        coins: pending.coins,
        rupees: pending.rupees,
    })
}

/// One audit row per nonzero amount; failures logged, siblings unaffected
async fn append_audit(
    pool: &SqlitePool,
    user_id: &str,
    order_id: &str,
    kind: TxnKind,
    amounts: &PendingAmounts,
) {
    let reason = match kind {
        TxnKind::Added => format!("Reward for order {order_id}"),
        TxnKind::Deducted => format!("Reward reversed for order {order_id}"),
    };
    if amounts.coins > 0 {
        let amount = format_coins(kind, amounts.coins);
        if let Err(e) = transaction::append(pool, user_id, kind, &amount, &reason).await {
            error!(order_id, error = %e, "failed to append coin audit record");
        }
    }
    if amounts.rupees > 0.0 {
        let amount = format_rupees(kind, amounts.rupees);
        if let Err(e) = transaction::append(pool, user_id, kind, &amount, &reason).await {
            error!(order_id, error = %e, "failed to append rupee audit record");
        }
    }
}

fn sign(kind: TxnKind) -> &'static str {
    match kind {
        TxnKind::Added => "+",
        TxnKind::Deducted => "-",
    }
}

fn format_coins(kind: TxnKind, coins: i64) -> String {
    format!("{}{} Coins", sign(kind), coins)
}

/// Whole rupees render without a decimal point ("+₹5", not "+₹5.0")
fn format_rupees(kind: TxnKind, rupees: f64) -> String {
    if rupees.fract() == 0.0 {
        format!("{}₹{}", sign(kind), rupees as i64)
    } else {
        format!("{}₹{}", sign(kind), rupees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coins() {
        assert_eq!(format_coins(TxnKind::Added, 12), "+12 Coins");
        assert_eq!(format_coins(TxnKind::Deducted, 3), "-3 Coins");
    }

    #[test]
    fn test_format_rupees_trims_whole_amounts() {
        assert_eq!(format_rupees(TxnKind::Added, 5.0), "+₹5");
        assert_eq!(format_rupees(TxnKind::Deducted, 5.0), "-₹5");
        assert_eq!(format_rupees(TxnKind::Added, 7.5), "+₹7.5");
    }
}
