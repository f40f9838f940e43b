//! Dashboard aggregates

use super::RepoResult;
use rust_decimal::Decimal;
use shared::models::{CustomerStats, DashboardStats, ProductStats, SalesStats};
use shared::util::cents_to_amount;
use sqlx::SqlitePool;

pub async fn sales(pool: &SqlitePool) -> RepoResult<SalesStats> {
    let (total, count) = sqlx::query_as::<_, (i64, i64)>(
        "SELECT COALESCE(SUM(price_paid_in_cents), 0), COUNT(*) FROM \"order\"",
    )
    .fetch_one(pool)
    .await?;
    Ok(SalesStats {
        amount: cents_to_amount(total),
        number_of_sales: count,
    })
}

pub async fn customers(pool: &SqlitePool) -> RepoResult<CustomerStats> {
    let user_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user")
        .fetch_one(pool)
        .await?;
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(price_paid_in_cents), 0) FROM \"order\"",
    )
    .fetch_one(pool)
    .await?;

    let average_value_per_user = if user_count == 0 {
        Decimal::new(0, 2)
    } else {
        (cents_to_amount(total) / Decimal::from(user_count)).round_dp(2)
    };

    Ok(CustomerStats {
        user_count,
        average_value_per_user,
    })
}

pub async fn products(pool: &SqlitePool) -> RepoResult<ProductStats> {
    let (active_count, inactive_count) = sqlx::query_as::<_, (i64, i64)>(
        "SELECT COALESCE(SUM(is_available_for_purchase = 1), 0), \
                COALESCE(SUM(is_available_for_purchase = 0), 0) \
         FROM product",
    )
    .fetch_one(pool)
    .await?;
    Ok(ProductStats {
        active_count,
        inactive_count,
    })
}

/// All three cards, queried concurrently
pub async fn stats(pool: &SqlitePool) -> RepoResult<DashboardStats> {
    let (sales, customers, products) =
        tokio::try_join!(sales(pool), customers(pool), products(pool))?;
    Ok(DashboardStats {
        sales,
        customers,
        products,
    })
}
