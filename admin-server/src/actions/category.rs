//! Category mutations

use super::{ActionOutcome, Actions};
use crate::cache::CATEGORY_VIEWS;
use crate::db::repository::{RepoError, category};
use crate::slug;
use crate::validation::{CategoryForm, CategoryInput};
use shared::error::ErrorCode;
use shared::models::Category;

const HAS_PRODUCTS: &str = "This category still has products and cannot be deleted.";

impl Actions {
    /// Create a category; a blank slug is derived from the name
    pub async fn add_category(&self, form: CategoryForm) -> ActionOutcome<Category> {
        let input = match CategoryInput::parse(form) {
            Ok(input) => input,
            Err(errors) => return errors.into(),
        };

        match category::find_by_slug(&self.pool, &input.slug).await {
            Ok(Some(_)) => return self.slug_taken(&input.slug, None).await,
            Ok(None) => {}
            Err(e) => return ActionOutcome::server_failure("saving the category", e),
        }

        let created = match category::create(&self.pool, &input.name, &input.slug).await {
            Ok(created) => created,
            Err(RepoError::Duplicate(_)) => return self.slug_taken(&input.slug, None).await,
            Err(e) => return ActionOutcome::server_failure("saving the category", e),
        };

        self.cache.revalidate_all(&CATEGORY_VIEWS);
        tracing::info!(id = %created.id, slug = %created.slug, "Category created");
        ActionOutcome::success(created)
    }

    /// Rename / re-slug a category
    pub async fn update_category(&self, id: &str, form: CategoryForm) -> ActionOutcome<Category> {
        let input = match CategoryInput::parse(form) {
            Ok(input) => input,
            Err(errors) => return errors.into(),
        };

        let existing = match category::find_by_id(&self.pool, id).await {
            Ok(Some(existing)) => existing,
            Ok(None) => return ActionOutcome::not_found("Category"),
            Err(e) => return ActionOutcome::server_failure("updating the category", e),
        };

        match category::find_by_slug(&self.pool, &input.slug).await {
            Ok(Some(other)) if other.id != existing.id => {
                return self.slug_taken(&input.slug, Some(&existing.slug)).await;
            }
            Ok(_) => {}
            Err(e) => return ActionOutcome::server_failure("updating the category", e),
        }

        let updated = match category::update(&self.pool, id, &input.name, &input.slug).await {
            Ok(updated) => updated,
            Err(RepoError::Duplicate(_)) => {
                return self.slug_taken(&input.slug, Some(&existing.slug)).await;
            }
            Err(RepoError::NotFound(_)) => return ActionOutcome::not_found("Category"),
            Err(e) => return ActionOutcome::server_failure("updating the category", e),
        };

        self.cache.revalidate_all(&CATEGORY_VIEWS);
        tracing::info!(id = %updated.id, slug = %updated.slug, "Category updated");
        ActionOutcome::success(updated)
    }

    /// Delete a category that no product is linked to
    pub async fn delete_category(&self, id: &str) -> ActionOutcome<Category> {
        let existing = match category::find_by_id(&self.pool, id).await {
            Ok(Some(existing)) => existing,
            Ok(None) => return ActionOutcome::not_found("Category"),
            Err(e) => return ActionOutcome::server_failure("deleting the category", e),
        };

        match category::count_products(&self.pool, id).await {
            Ok(0) => {}
            Ok(_) => return ActionOutcome::business_rule(ErrorCode::CategoryHasProducts, HAS_PRODUCTS),
            Err(e) => return ActionOutcome::server_failure("deleting the category", e),
        }

        match category::delete(&self.pool, id).await {
            Ok(true) => {}
            Ok(false) => return ActionOutcome::not_found("Category"),
            Err(RepoError::Referenced(_)) => {
                return ActionOutcome::business_rule(ErrorCode::CategoryHasProducts, HAS_PRODUCTS);
            }
            Err(e) => return ActionOutcome::server_failure("deleting the category", e),
        }

        self.cache.revalidate_all(&CATEGORY_VIEWS);
        tracing::info!(id = %existing.id, "Category deleted");
        ActionOutcome::success(existing)
    }

    /// Slug collision, with a free alternative when one can be computed
    async fn slug_taken<T>(&self, slug: &str, current: Option<&str>) -> ActionOutcome<T> {
        let message = match category::all_slugs(&self.pool).await {
            Ok(existing) => {
                let free = slug::resolve_unique(slug, &existing, current);
                format!("Slug '{slug}' is already in use (try '{free}')")
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not compute a free slug");
                format!("Slug '{slug}' is already in use")
            }
        };
        ActionOutcome::business_rule(ErrorCode::SlugAlreadyExists, message)
    }
}
