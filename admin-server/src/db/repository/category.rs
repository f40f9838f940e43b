//! Category Repository

use super::{RepoError, RepoResult, new_id};
use shared::models::{Category, CategorySummary};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, slug, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(&format!(
        "SELECT {COLUMNS} FROM category WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(category)
}

/// Case-insensitive lookup (the column is `COLLATE NOCASE`)
pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(&format!(
        "SELECT {COLUMNS} FROM category WHERE slug = ? LIMIT 1"
    ))
    .bind(slug)
    .fetch_optional(pool)
    .await?;
    Ok(category)
}

pub async fn exists(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM category WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(found > 0)
}

pub async fn all_slugs(pool: &SqlitePool) -> RepoResult<Vec<String>> {
    let slugs = sqlx::query_scalar::<_, String>("SELECT slug FROM category")
        .fetch_all(pool)
        .await?;
    Ok(slugs)
}

/// Categories table: every category with its linked product count, by name
pub async fn list_summaries(pool: &SqlitePool) -> RepoResult<Vec<CategorySummary>> {
    let rows = sqlx::query_as::<_, CategorySummary>(
        "SELECT c.id, c.name, c.slug, COUNT(pc.product_id) AS product_count \
         FROM category c \
         LEFT JOIN product_category pc ON pc.category_id = c.id \
         GROUP BY c.id \
         ORDER BY c.name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count_products(pool: &SqlitePool, id: &str) -> RepoResult<i64> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product_category WHERE category_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, name: &str, slug: &str) -> RepoResult<Category> {
    let id = new_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO category (id, name, slug, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(name)
    .bind(slug)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(pool: &SqlitePool, id: &str, name: &str, slug: &str) -> RepoResult<Category> {
    let rows = sqlx::query("UPDATE category SET name = ?, slug = ?, updated_at = ? WHERE id = ?")
        .bind(name)
        .bind(slug)
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Delete a category row
///
/// Linked products make the foreign key refuse with [`RepoError::Referenced`].
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let created = create(&pool, "Elektronik", "elektronik").await.unwrap();
        assert_eq!(created.slug, "elektronik");

        let found = find_by_id(&pool, &created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(exists(&pool, &created.id).await.unwrap());
        assert!(!exists(&pool, "missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_slug_unique_ignores_case() {
        let pool = test_pool().await;
        create(&pool, "Kitap", "kitap").await.unwrap();

        let err = create(&pool, "Kitap 2", "KITAP").await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
        assert!(find_by_slug(&pool, "Kitap").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let pool = test_pool().await;
        let err = update(&pool, "nope", "Name", "name").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_summaries_ordered_by_name() {
        let pool = test_pool().await;
        create(&pool, "Oyuncak", "oyuncak").await.unwrap();
        create(&pool, "Elektronik", "elektronik").await.unwrap();

        let rows = list_summaries(&pool).await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Elektronik", "Oyuncak"]);
        assert!(rows.iter().all(|r| r.product_count == 0));
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        let c = create(&pool, "Kitap", "kitap").await.unwrap();
        assert!(delete(&pool, &c.id).await.unwrap());
        assert!(!delete(&pool, &c.id).await.unwrap());
    }
}
