//! Order Repository

use super::{RepoResult, new_id};
use shared::models::OrderSummary;
use shared::util::now_millis;
use sqlx::SqlitePool;

/// Orders table, newest first
pub async fn list_summaries(pool: &SqlitePool) -> RepoResult<Vec<OrderSummary>> {
    let rows = sqlx::query_as::<_, OrderSummary>(
        "SELECT o.id, o.price_paid_in_cents, p.name AS product_name, u.email AS user_email, \
                o.created_at \
         FROM \"order\" o \
         JOIN product p ON p.id = o.product_id \
         JOIN user u ON u.id = o.user_id \
         ORDER BY o.created_at DESC, o.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Record a purchase; returns the new order id
pub async fn create(
    pool: &SqlitePool,
    user_id: &str,
    product_id: &str,
    price_paid_in_cents: i64,
) -> RepoResult<String> {
    let id = new_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO \"order\" (id, price_paid_in_cents, product_id, user_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(price_paid_in_cents)
    .bind(product_id)
    .bind(user_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(id)
}
