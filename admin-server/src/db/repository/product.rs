//! Product Repository
//!
//! Product rows and their single category link are always written together
//! in one transaction.

use super::{RepoError, RepoResult, new_id};
use shared::models::{Product, ProductDetail, ProductSummary};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, description, price_in_cents, img_path, \
                       is_available_for_purchase, created_at, updated_at";

/// Fields of a product row plus its category link
#[derive(Debug, Clone)]
pub struct ProductWrite {
    pub name: String,
    pub description: String,
    pub price_in_cents: i64,
    pub category_id: String,
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM product WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

/// Product with its linked category id (edit screen)
pub async fn find_detail(pool: &SqlitePool, id: &str) -> RepoResult<Option<ProductDetail>> {
    let Some(product) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let category_id = sqlx::query_scalar::<_, String>(
        "SELECT category_id FROM product_category WHERE product_id = ? LIMIT 1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(Some(ProductDetail {
        product,
        category_id,
    }))
}

/// Products table: every product with its order count, by name
pub async fn list_summaries(pool: &SqlitePool) -> RepoResult<Vec<ProductSummary>> {
    let rows = sqlx::query_as::<_, ProductSummary>(
        "SELECT p.id, p.name, p.price_in_cents, p.is_available_for_purchase, \
                COUNT(o.id) AS order_count \
         FROM product p \
         LEFT JOIN \"order\" o ON o.product_id = p.id \
         GROUP BY p.id \
         ORDER BY p.name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Every `img_path` currently referenced by a row
pub async fn all_img_paths(pool: &SqlitePool) -> RepoResult<Vec<(String, String)>> {
    let rows = sqlx::query_as::<_, (String, String)>("SELECT id, img_path FROM product")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count_orders(pool: &SqlitePool, id: &str) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM \"order\" WHERE product_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert a product and its category link
pub async fn create(pool: &SqlitePool, data: ProductWrite, img_path: &str) -> RepoResult<Product> {
    let id = new_id();
    let now = now_millis();

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO product (id, name, description, price_in_cents, img_path, \
         is_available_for_purchase, created_at, updated_at) VALUES (?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(&id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price_in_cents)
    .bind(img_path)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    sqlx::query("INSERT INTO product_category (product_id, category_id) VALUES (?, ?)")
        .bind(&id)
        .bind(&data.category_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

/// Update fields and replace the category link
///
/// `img_path` of `None` keeps the stored path.
pub async fn update(
    pool: &SqlitePool,
    id: &str,
    data: ProductWrite,
    img_path: Option<&str>,
) -> RepoResult<Product> {
    let mut tx = pool.begin().await?;
    let rows = sqlx::query(
        "UPDATE product SET name = ?1, description = ?2, price_in_cents = ?3, \
         img_path = COALESCE(?4, img_path), updated_at = ?5 WHERE id = ?6",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price_in_cents)
    .bind(img_path)
    .bind(now_millis())
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    sqlx::query("DELETE FROM product_category WHERE product_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("INSERT INTO product_category (product_id, category_id) VALUES (?, ?)")
        .bind(id)
        .bind(&data.category_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

pub async fn set_availability(pool: &SqlitePool, id: &str, available: bool) -> RepoResult<Product> {
    let rows = sqlx::query(
        "UPDATE product SET is_available_for_purchase = ?, updated_at = ? WHERE id = ?",
    )
    .bind(available)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Delete a product row; its category link goes with it (ON DELETE CASCADE)
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::category;
    use crate::db::repository::test_support::test_pool;

    fn write(category_id: &str) -> ProductWrite {
        ProductWrite {
            name: "Kalem".into(),
            description: "Yazi yazar.".into(),
            price_in_cents: 150,
            category_id: category_id.into(),
        }
    }

    #[tokio::test]
    async fn test_create_links_category() {
        let pool = test_pool().await;
        let cat = category::create(&pool, "Kirtasiye", "kirtasiye").await.unwrap();

        let p = create(&pool, write(&cat.id), "/products/a-kalem.jpg").await.unwrap();
        assert!(p.is_available_for_purchase);

        let detail = find_detail(&pool, &p.id).await.unwrap().unwrap();
        assert_eq!(detail.category_id.as_deref(), Some(cat.id.as_str()));
        assert_eq!(category::count_products(&pool, &cat.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_with_missing_category_rolls_back() {
        let pool = test_pool().await;
        let err = create(&pool, write("missing"), "/products/a.jpg").await.unwrap_err();
        assert!(matches!(err, RepoError::Referenced(_)));
        assert!(list_summaries(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_link_and_keeps_image() {
        let pool = test_pool().await;
        let a = category::create(&pool, "A", "a").await.unwrap();
        let b = category::create(&pool, "B", "b").await.unwrap();
        let p = create(&pool, write(&a.id), "/products/a.jpg").await.unwrap();

        let updated = update(&pool, &p.id, write(&b.id), None).await.unwrap();
        assert_eq!(updated.img_path, "/products/a.jpg");

        let detail = find_detail(&pool, &p.id).await.unwrap().unwrap();
        assert_eq!(detail.category_id.as_deref(), Some(b.id.as_str()));
        assert_eq!(category::count_products(&pool, &a.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_availability_missing() {
        let pool = test_pool().await;
        let err = set_availability(&pool, "missing", false).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_cascades_link() {
        let pool = test_pool().await;
        let cat = category::create(&pool, "A", "a").await.unwrap();
        let p = create(&pool, write(&cat.id), "/products/a.jpg").await.unwrap();

        assert!(delete(&pool, &p.id).await.unwrap());
        assert_eq!(category::count_products(&pool, &cat.id).await.unwrap(), 0);
        assert!(category::delete(&pool, &cat.id).await.unwrap());
    }
}
