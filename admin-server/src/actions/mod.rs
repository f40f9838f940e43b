//! Mutation handlers for categories and products
//!
//! Each submission runs validate → business checks → image side effect →
//! row write → view invalidation, and ends in one [`ActionOutcome`]. Lower
//! level errors never escape: they become `ServerFailure` here.

mod category;
mod outcome;
mod product;

pub use outcome::ActionOutcome;

use crate::cache::ViewCache;
use crate::images::ImageStore;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Everything a mutation needs, passed in explicitly
#[derive(Debug, Clone)]
pub struct Actions {
    pool: SqlitePool,
    images: Arc<dyn ImageStore>,
    cache: ViewCache,
}

impl Actions {
    pub fn new(pool: SqlitePool, images: Arc<dyn ImageStore>, cache: ViewCache) -> Self {
        Self {
            pool,
            images,
            cache,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn images(&self) -> &Arc<dyn ImageStore> {
        &self.images
    }

    pub fn cache(&self) -> &ViewCache {
        &self.cache
    }
}
