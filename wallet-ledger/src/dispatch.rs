//! Order Event Dispatch
//!
//! One entry point per delivered order write. The two reconcilers run on
//! disjoint aggregates (owner wallet vs customer balance) and are each
//! independently idempotent, so a partial failure can be retried by
//! re-delivering the same event.

use crate::error::LedgerResult;
use crate::events::{OrderTransition, OrderWriteEvent};
use crate::owner_wallet::reconcile_owner_wallet;
use crate::reward;
use tracing::debug;

/// React to one order write event.
///
/// Errors here are transient store failures: the caller (worker or
/// platform adapter) reports failure and the platform re-delivers.
pub async fn handle_order_write(pool: &sqlx::SqlitePool, event: &OrderWriteEvent) -> LedgerResult<()> {
    let outcome = reconcile_owner_wallet(pool, event).await?;
    debug!(?outcome, "owner wallet reconciled");

    if let Some(after) = &event.after {
        match event.transition() {
            OrderTransition::Confirmed => {
                reward::confirm_reward(pool, &after.id).await?;
            }
            OrderTransition::Cancelled => {
                reward::cancel_reward(pool, &after.id).await?;
            }
            _ => {}
        }
    }
    Ok(())
}
