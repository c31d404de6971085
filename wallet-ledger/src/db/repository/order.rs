//! Order Repository
//!
//! Order rows are written by the storefront ordering flow and the owner
//! confirm/cancel actions; the reconcilers only advance marker fields
//! (see `owner_wallet` and `balance` repositories).

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderCreate, OrderStatus};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Insert a new pending order (storefront flow)
pub async fn insert(pool: &SqlitePool, data: OrderCreate) -> RepoResult<Order> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO orders (id, owner_id, user_id, order_type, subtotal, delivery_charge, total, status, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'pending', ?8)",
    )
    .bind(&data.id)
    .bind(&data.owner_id)
    .bind(&data.user_id)
    .bind(&data.order_type)
    .bind(data.subtotal)
    .bind(data.delivery_charge)
    .bind(data.total)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, &data.id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

/// Advance the order status (owner confirm/cancel action).
///
/// Enforces monotonicity: pending → confirmed | cancelled and
/// confirmed → cancelled are the only real transitions; writing the current
/// status again is a no-op. Returns the (before, after) snapshot pair so the
/// caller can hand it to the event dispatcher.
pub async fn update_status(
    pool: &SqlitePool,
    id: &str,
    new_status: OrderStatus,
) -> RepoResult<(Order, Order)> {
    let before = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;

    let allowed = match (before.status, new_status) {
        (current, next) if current == next => true,
        (OrderStatus::Pending, OrderStatus::Confirmed) => true,
        (OrderStatus::Pending, OrderStatus::Cancelled) => true,
        (OrderStatus::Confirmed, OrderStatus::Cancelled) => true,
        _ => false,
    };
    if !allowed {
        return Err(RepoError::Validation(format!(
            "Order {id}: illegal status transition {:?} -> {:?}",
            before.status, new_status
        )));
    }

    sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
        .bind(new_status)
        .bind(id)
        .execute(pool)
        .await?;

    let after = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))?;
    Ok((before, after))
}

/// Delete an order row (external admin action; the ledger takes no
/// compensating action on deletion)
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
