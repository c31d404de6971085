//! Order Write Events
//!
//! The event platform delivers a pre-write/post-write snapshot pair for
//! every order create/update/delete, at least once and not necessarily in
//! order. Delivery order is never trusted: the persisted marker fields are
//! the only source of ordering truth, and classification here only decides
//! which branch gets to consult them.

use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderStatus};

/// One order write as delivered by the event platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWriteEvent {
    /// Snapshot before the write; `None` on create
    pub before: Option<Order>,
    /// Snapshot after the write; `None` on delete
    pub after: Option<Order>,
}

/// Recognized order transitions, evaluated in strict order — the first
/// matching branch wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderTransition {
    /// Order row deleted; the ledger takes no compensating action
    Deleted,
    /// First write of the order
    Created,
    /// Status moved into `confirmed`
    Confirmed,
    /// Status moved into `cancelled`
    Cancelled,
    /// Any other write (item edits, note changes, redundant status writes)
    Unchanged,
}

impl OrderWriteEvent {
    pub fn created(after: Order) -> Self {
        Self { before: None, after: Some(after) }
    }

    pub fn updated(before: Order, after: Order) -> Self {
        Self { before: Some(before), after: Some(after) }
    }

    pub fn deleted(before: Order) -> Self {
        Self { before: Some(before), after: None }
    }

    pub fn transition(&self) -> OrderTransition {
        match (&self.before, &self.after) {
            (_, None) => OrderTransition::Deleted,
            (None, Some(_)) => OrderTransition::Created,
            (Some(before), Some(after)) => {
                if before.status != OrderStatus::Confirmed && after.status == OrderStatus::Confirmed
                {
                    OrderTransition::Confirmed
                } else if before.status != OrderStatus::Cancelled
                    && after.status == OrderStatus::Cancelled
                {
                    OrderTransition::Cancelled
                } else {
                    OrderTransition::Unchanged
                }
            }
        }
    }
}
