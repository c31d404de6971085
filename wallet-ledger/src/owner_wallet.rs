//! Owner Wallet Reconciler
//!
//! Maintains each merchant's running revenue wallet from order write
//! events: credit the subtotal exactly once on creation, reverse it exactly
//! once on cancellation. Safe to re-invoke with the same event — the
//! persisted marker fields (`already_added`, `cancel_processed`) are the
//! single-use gates, claimed in the same transaction as the wallet delta.

use crate::db::repository::{MutationOutcome, RepoResult, owner_wallet};
use crate::events::{OrderTransition, OrderWriteEvent};
use shared::models::{Order, OrderType};
use tracing::{debug, warn};

/// What the reconciler did with an event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WalletOutcome {
    Credited { amount: f64 },
    Debited { amount: f64 },
    NoOp,
}

/// React to one order write (at-least-once delivery).
///
/// Branches are evaluated in strict order; the first match terminates.
pub async fn reconcile_owner_wallet(
    pool: &sqlx::SqlitePool,
    event: &OrderWriteEvent,
) -> RepoResult<WalletOutcome> {
    let Some(after) = &event.after else {
        // Deletion: a credited order that is deleted instead of cancelled is
        // never reversed. Known limitation, see DESIGN.md.
        debug!("order deleted, no wallet reconciliation");
        return Ok(WalletOutcome::NoOp);
    };

    match event.transition() {
        OrderTransition::Created => {
            if after.already_added {
                return Ok(WalletOutcome::NoOp);
            }
            let Some((order_type, amount)) = wallet_effect(after) else {
                return Ok(WalletOutcome::NoOp);
            };
            match owner_wallet::credit_for_order(pool, &after.id, &after.owner_id, order_type, amount)
                .await?
            {
                MutationOutcome::Applied => {
                    debug!(order_id = %after.id, amount, "owner wallet credited");
                    Ok(WalletOutcome::Credited { amount })
                }
                MutationOutcome::AlreadyApplied => Ok(WalletOutcome::NoOp),
            }
        }
        OrderTransition::Confirmed => {
            // Revenue was already credited at creation
            Ok(WalletOutcome::NoOp)
        }
        OrderTransition::Cancelled => {
            if !after.already_added || after.cancel_processed {
                return Ok(WalletOutcome::NoOp);
            }
            let Some((order_type, amount)) = wallet_effect(after) else {
                return Ok(WalletOutcome::NoOp);
            };
            match owner_wallet::debit_for_order(pool, &after.id, &after.owner_id, order_type, amount)
                .await?
            {
                MutationOutcome::Applied => {
                    debug!(order_id = %after.id, amount, "owner wallet debited");
                    Ok(WalletOutcome::Debited { amount })
                }
                MutationOutcome::AlreadyApplied => Ok(WalletOutcome::NoOp),
            }
        }
        OrderTransition::Deleted | OrderTransition::Unchanged => Ok(WalletOutcome::NoOp),
    }
}

/// Validate and coerce the fields a wallet mutation depends on.
///
/// Invalid input is a logged no-op, never an error: the event is consumed
/// so the platform does not retry something that can never succeed.
fn wallet_effect(order: &Order) -> Option<(OrderType, f64)> {
    if order.owner_id.trim().is_empty() {
        warn!(order_id = %order.id, "order has no owner_id, skipping wallet mutation");
        return None;
    }
    if !(order.subtotal > 0.0) {
        debug!(order_id = %order.id, subtotal = order.subtotal, "non-positive subtotal, no wallet effect");
        return None;
    }
    let Some(order_type) = OrderType::parse(&order.order_type) else {
        warn!(order_id = %order.id, order_type = %order.order_type, "unrecognized order_type, skipping wallet mutation");
        return None;
    };
    Some((order_type, order.subtotal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OrderStatus;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: "o1".into(),
            owner_id: "owner-1".into(),
            user_id: "user-1".into(),
            order_type: "inside".into(),
            subtotal: 250.0,
            delivery_charge: 0.0,
            total: 250.0,
            status,
            already_added: false,
            cancel_processed: false,
            reward_coins: None,
            reward_rupees: None,
            reward_status: None,
            first_order_applied: false,
            created_at: 0,
        }
    }

    #[test]
    fn test_wallet_effect_guards() {
        let good = order(OrderStatus::Pending);
        assert_eq!(wallet_effect(&good), Some((OrderType::Inside, 250.0)));

        let mut no_owner = order(OrderStatus::Pending);
        no_owner.owner_id = "  ".into();
        assert_eq!(wallet_effect(&no_owner), None);

        let mut zero = order(OrderStatus::Pending);
        zero.subtotal = 0.0;
        assert_eq!(wallet_effect(&zero), None);

        let mut negative = order(OrderStatus::Pending);
        negative.subtotal = -10.0;
        assert_eq!(wallet_effect(&negative), None);

        let mut bad_type = order(OrderStatus::Pending);
        bad_type.order_type = "pickup".into();
        assert_eq!(wallet_effect(&bad_type), None);

        // Raw casing is coerced at this boundary, not upstream
        let mut cased = order(OrderStatus::Pending);
        cased.order_type = " Outside ".into();
        assert_eq!(wallet_effect(&cased), Some((OrderType::Outside, 250.0)));
    }
}
