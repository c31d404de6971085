//! Ledger Background Worker
//!
//! Consumes order write events from an mpsc channel and runs the
//! dispatcher. Failures are logged and swallowed here (the platform
//! adapter that feeds the channel owns re-delivery); the worker exits
//! when the channel closes.

use crate::dispatch::handle_order_write;
use crate::events::OrderWriteEvent;
use sqlx::SqlitePool;

pub struct LedgerWorker {
    pool: SqlitePool,
}

impl LedgerWorker {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run the worker (blocks until the channel closes)
    pub async fn run(self, mut rx: tokio::sync::mpsc::Receiver<OrderWriteEvent>) {
        tracing::info!("Ledger worker started");

        while let Some(event) = rx.recv().await {
            let order_id = event
                .after
                .as_ref()
                .or(event.before.as_ref())
                .map(|o| o.id.clone())
                .unwrap_or_default();
            if let Err(e) = handle_order_write(&self.pool, &event).await {
                tracing::error!(order_id = %order_id, error = %e, "order event reconciliation failed");
            }
        }

        tracing::info!("Order event channel closed, ledger worker stopping");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::{order, owner_wallet};
    use shared::models::OrderCreate;

    #[tokio::test]
    async fn test_worker_drains_channel_and_reconciles() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let created = order::insert(
            &pool,
            OrderCreate {
                id: "o1".into(),
                owner_id: "owner-1".into(),
                user_id: "user-1".into(),
                order_type: "inside".into(),
                subtotal: 99.0,
                delivery_charge: 0.0,
                total: 99.0,
            },
        )
        .await
        .unwrap();

        let (tx, rx) = tokio::sync::mpsc::channel(8);
        let worker = LedgerWorker::new(pool.clone());
        let handle = tokio::spawn(worker.run(rx));

        // Duplicate delivery of the same create event
        tx.send(OrderWriteEvent::created(created.clone())).await.unwrap();
        tx.send(OrderWriteEvent::created(created)).await.unwrap();
        drop(tx);
        handle.await.unwrap();

        let wallet = owner_wallet::find(&pool, "owner-1").await.unwrap().unwrap();
        assert_eq!(wallet.total_amount, 99.0);
    }
}
