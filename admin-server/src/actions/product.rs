//! Product mutations
//!
//! A product row and its image file must never disagree where the caller can
//! see it. Ordering per operation:
//!
//! - add: store file, insert row; a failed insert removes the new file
//! - update: store the new file, update the row, then delete the old file. A
//!   failed update removes the new file; a failed old-file removal leaves an
//!   orphan for the sweep. The row always names a file that exists.
//! - delete: delete row, then remove file. A failed removal leaves an orphan
//!   file for the sweep; the row deletion stands.

use super::{ActionOutcome, Actions};
use crate::cache::PRODUCT_VIEWS;
use crate::db::repository::{RepoError, category, product};
use crate::validation::{ProductForm, ProductInput};
use shared::error::ErrorCode;
use shared::models::Product;

const CATEGORY_MISSING: &str = "The selected category does not exist.";
const HAS_ORDERS: &str = "This product has orders and cannot be deleted.";

impl Actions {
    pub async fn add_product(&self, form: ProductForm) -> ActionOutcome<Product> {
        let input = match ProductInput::parse_new(form) {
            Ok(input) => input,
            Err(errors) => return errors.into(),
        };
        if let Some(failure) = self.check_category(&input.category_id, "saving the product").await {
            return failure;
        }

        let (write, image) = input.into_parts();
        let img_path = match self.images.store(&image).await {
            Ok(path) => path,
            Err(e) => return ActionOutcome::server_failure("saving the product", e),
        };

        let created = match product::create(&self.pool, write, &img_path).await {
            Ok(created) => created,
            Err(e) => {
                if let Err(undo) = self.images.remove(&img_path).await {
                    tracing::warn!(path = %img_path, error = %undo, "Failed to remove image of unsaved product");
                }
                return match e {
                    RepoError::Referenced(_) => {
                        ActionOutcome::business_rule(ErrorCode::CategoryNotFound, CATEGORY_MISSING)
                    }
                    e => ActionOutcome::server_failure("saving the product", e),
                };
            }
        };

        self.cache.revalidate_all(&PRODUCT_VIEWS);
        tracing::info!(id = %created.id, img_path = %created.img_path, "Product created");
        ActionOutcome::success(created)
    }

    /// Update fields and category; an empty image field keeps the current image
    pub async fn update_product(&self, id: &str, form: ProductForm) -> ActionOutcome<Product> {
        let input = match ProductInput::parse_edit(form) {
            Ok(input) => input,
            Err(errors) => return errors.into(),
        };

        let existing = match product::find_by_id(&self.pool, id).await {
            Ok(Some(existing)) => existing,
            Ok(None) => return ActionOutcome::not_found("Product"),
            Err(e) => return ActionOutcome::server_failure("saving the product", e),
        };
        if let Some(failure) = self.check_category(&input.category_id, "saving the product").await {
            return failure;
        }

        let (write, image) = input.into_parts();
        let new_path = match image {
            Some(image) => match self.images.store(&image).await {
                Ok(path) => Some(path),
                Err(e) => return ActionOutcome::server_failure("saving the product", e),
            },
            None => None,
        };

        let updated = match product::update(&self.pool, id, write, new_path.as_deref()).await {
            Ok(updated) => updated,
            Err(e) => {
                if let Some(path) = &new_path
                    && let Err(undo) = self.images.remove(path).await
                {
                    tracing::warn!(path = %path, error = %undo, "Failed to remove new image after failed update");
                }
                return match e {
                    RepoError::NotFound(_) => ActionOutcome::not_found("Product"),
                    RepoError::Referenced(_) => {
                        ActionOutcome::business_rule(ErrorCode::CategoryNotFound, CATEGORY_MISSING)
                    }
                    e => ActionOutcome::server_failure("saving the product", e),
                };
            }
        };

        if new_path.is_some()
            && let Err(e) = self.images.remove(&existing.img_path).await
        {
            tracing::warn!(
                id = %id,
                path = %existing.img_path,
                error = %e,
                "Previous product image left behind"
            );
        }

        self.cache.revalidate_all(&PRODUCT_VIEWS);
        tracing::info!(id = %updated.id, image_replaced = new_path.is_some(), "Product updated");
        ActionOutcome::success(updated)
    }

    /// Flip the purchasable flag; no validation involved
    pub async fn toggle_product_availability(
        &self,
        id: &str,
        is_available_for_purchase: bool,
    ) -> ActionOutcome<Product> {
        let updated =
            match product::set_availability(&self.pool, id, is_available_for_purchase).await {
                Ok(updated) => updated,
                Err(RepoError::NotFound(_)) => return ActionOutcome::not_found("Product"),
                Err(e) => return ActionOutcome::server_failure("updating availability", e),
            };

        self.cache.revalidate_all(&PRODUCT_VIEWS);
        tracing::info!(id = %updated.id, available = is_available_for_purchase, "Product availability changed");
        ActionOutcome::success(updated)
    }

    /// Delete a product without orders, then its image
    pub async fn delete_product(&self, id: &str) -> ActionOutcome<Product> {
        let existing = match product::find_by_id(&self.pool, id).await {
            Ok(Some(existing)) => existing,
            Ok(None) => return ActionOutcome::not_found("Product"),
            Err(e) => return ActionOutcome::server_failure("deleting the product", e),
        };

        match product::count_orders(&self.pool, id).await {
            Ok(0) => {}
            Ok(_) => return ActionOutcome::business_rule(ErrorCode::ProductHasOrders, HAS_ORDERS),
            Err(e) => return ActionOutcome::server_failure("deleting the product", e),
        }

        match product::delete(&self.pool, id).await {
            Ok(true) => {}
            Ok(false) => return ActionOutcome::not_found("Product"),
            Err(RepoError::Referenced(_)) => {
                return ActionOutcome::business_rule(ErrorCode::ProductHasOrders, HAS_ORDERS);
            }
            Err(e) => return ActionOutcome::server_failure("deleting the product", e),
        }

        // The row is gone whatever happens to the file.
        self.cache.revalidate_all(&PRODUCT_VIEWS);

        if let Err(e) = self.images.remove(&existing.img_path).await {
            return ActionOutcome::server_failure("deleting the product image", e);
        }

        tracing::info!(id = %existing.id, "Product deleted");
        ActionOutcome::success(existing)
    }

    /// `Some(failure)` when the selected category is missing
    async fn check_category(&self, category_id: &str, doing: &str) -> Option<ActionOutcome<Product>> {
        match category::exists(&self.pool, category_id).await {
            Ok(true) => None,
            Ok(false) => Some(ActionOutcome::business_rule(
                ErrorCode::CategoryNotFound,
                CATEGORY_MISSING,
            )),
            Err(e) => Some(ActionOutcome::server_failure(doing, e)),
        }
    }
}
