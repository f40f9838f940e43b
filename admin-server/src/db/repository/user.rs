//! User Repository

use super::{RepoResult, new_id};
use shared::models::UserSummary;
use shared::util::now_millis;
use sqlx::SqlitePool;

/// Customers table with order count and total spent, newest first
pub async fn list_summaries(pool: &SqlitePool) -> RepoResult<Vec<UserSummary>> {
    let rows = sqlx::query_as::<_, UserSummary>(
        "SELECT u.id, u.email, COUNT(o.id) AS order_count, \
                COALESCE(SUM(o.price_paid_in_cents), 0) AS total_spent_in_cents, u.created_at \
         FROM user u \
         LEFT JOIN \"order\" o ON o.user_id = u.id \
         GROUP BY u.id \
         ORDER BY u.created_at DESC, u.email",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Register a customer; returns the new user id
pub async fn create(pool: &SqlitePool, email: &str) -> RepoResult<String> {
    let id = new_id();
    let now = now_millis();
    sqlx::query("INSERT INTO user (id, email, created_at, updated_at) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(email)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;
    Ok(id)
}
