use std::sync::Arc;

use crate::actions::Actions;
use crate::cache::ViewCache;
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::images::{self, ImageStore, LocalImageStore, ReconcileReport};

/// Server state: shared handles for every request
///
/// Cheap to clone; everything inside is reference counted.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | configuration (immutable) |
/// | db | SQLite pool |
/// | images | image files under `PUBLIC_DIR/IMAGE_DIR` |
/// | cache | cached listing views |
/// | actions | mutation handlers over the three above |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub images: Arc<LocalImageStore>,
    pub cache: ViewCache,
    pub actions: Actions,
}

impl ServerState {
    /// Assemble state from an opened database
    pub fn new(config: Config, db: DbService) -> Self {
        let images = Arc::new(LocalImageStore::new(
            config.image_root(),
            config.image_dir.clone(),
        ));
        let cache = ViewCache::new();
        let store: Arc<dyn ImageStore> = images.clone();
        let actions = Actions::new(db.pool.clone(), store, cache.clone());
        Self {
            config,
            db,
            images,
            cache,
            actions,
        }
    }

    /// Open the database from config and build the state
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_url).await?;
        Ok(Self::new(config.clone(), db))
    }

    /// Startup work that must finish before requests are served
    pub async fn run_startup_tasks(&self) -> Option<ReconcileReport> {
        if !self.config.reconcile_on_startup {
            return None;
        }
        Some(images::reconcile(&self.db.pool, self.images.as_ref()).await)
    }
}
