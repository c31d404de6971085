//! Customer Profile Repository
//!
//! Only the first-order marker lives here; the rest of the customer
//! profile belongs to the authentication/profile surfaces.

use super::RepoResult;
use shared::models::CustomerProfile;
use sqlx::SqlitePool;

pub async fn find(pool: &SqlitePool, user_id: &str) -> RepoResult<Option<CustomerProfile>> {
    let row = sqlx::query_as::<_, CustomerProfile>("SELECT * FROM customer_profile WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Whether the customer has ever placed an order (first-order bonus spent)
pub async fn first_order_done(pool: &SqlitePool, user_id: &str) -> RepoResult<bool> {
    let profile = find(pool, user_id).await?;
    Ok(profile.map(|p| p.first_order_done).unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn test_unknown_customer_has_no_first_order() {
        let pool = DbService::in_memory().await.unwrap().pool;
        assert!(!first_order_done(&pool, "user-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_marker_read_back() {
        let pool = DbService::in_memory().await.unwrap().pool;
        sqlx::query("INSERT INTO customer_profile (user_id, first_order_done) VALUES ('user-1', 1)")
            .execute(&pool)
            .await
            .unwrap();
        assert!(first_order_done(&pool, "user-1").await.unwrap());
    }
}
