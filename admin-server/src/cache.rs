//! Cached listing views
//!
//! Listing endpoints read through [`ViewCache`]; mutations call
//! [`ViewCache::revalidate`] for every view that depends on what they changed.
//! Each view carries a generation number so a computation that started before
//! an invalidation never overwrites it with stale data.

use dashmap::DashMap;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// Admin pages backed by the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Dashboard,
    Products,
    Categories,
    Orders,
    Users,
}

impl View {
    /// Page the view renders
    pub fn path(self) -> &'static str {
        match self {
            View::Dashboard => "/admin",
            View::Products => "/admin/products",
            View::Categories => "/admin/categories",
            View::Orders => "/admin/orders",
            View::Users => "/admin/users",
        }
    }
}

/// Views touched by product mutations (counts show up on all three)
pub const PRODUCT_VIEWS: [View; 3] = [View::Products, View::Categories, View::Dashboard];

/// Views touched by category mutations
pub const CATEGORY_VIEWS: [View; 1] = [View::Categories];

#[derive(Debug)]
struct Entry {
    generation: u64,
    body: Arc<Value>,
}

/// Last rendered JSON per view
#[derive(Debug, Clone, Default)]
pub struct ViewCache {
    entries: Arc<DashMap<View, Entry>>,
    generations: Arc<DashMap<View, u64>>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation; bumps on every invalidation
    pub fn generation(&self, view: View) -> u64 {
        self.generations.get(&view).map(|g| *g).unwrap_or(0)
    }

    pub fn get(&self, view: View) -> Option<Arc<Value>> {
        let generation = self.generation(view);
        self.entries
            .get(&view)
            .filter(|e| e.generation == generation)
            .map(|e| e.body.clone())
    }

    /// Store a body computed while the view was at `generation`
    ///
    /// Dropped when the view was invalidated in the meantime.
    pub fn store(&self, view: View, generation: u64, body: Value) -> Arc<Value> {
        let body = Arc::new(body);
        if self.generation(view) == generation {
            self.entries.insert(
                view,
                Entry {
                    generation,
                    body: body.clone(),
                },
            );
        }
        body
    }

    /// Mark a view stale. Idempotent.
    pub fn revalidate(&self, view: View) {
        {
            let mut generation = self.generations.entry(view).or_insert(0);
            *generation += 1;
        }
        self.entries.remove(&view);
        tracing::debug!(path = view.path(), "View revalidated");
    }

    pub fn revalidate_all(&self, views: &[View]) {
        for view in views {
            self.revalidate(*view);
        }
    }

    /// Cached body, or compute, cache and return it
    pub async fn get_or_compute<F, Fut, E>(&self, view: View, compute: F) -> Result<Arc<Value>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        if let Some(body) = self.get(view) {
            return Ok(body);
        }
        let generation = self.generation(view);
        let body = compute().await?;
        Ok(self.store(view, generation, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_and_get() {
        let cache = ViewCache::new();
        assert!(cache.get(View::Products).is_none());

        let generation = cache.generation(View::Products);
        cache.store(View::Products, generation, json!([1, 2]));
        assert_eq!(*cache.get(View::Products).unwrap(), json!([1, 2]));
        assert!(cache.get(View::Categories).is_none());
    }

    #[test]
    fn test_revalidate_drops_entry() {
        let cache = ViewCache::new();
        cache.store(View::Categories, 0, json!("old"));
        cache.revalidate(View::Categories);
        cache.revalidate(View::Categories);
        assert!(cache.get(View::Categories).is_none());
        assert_eq!(cache.generation(View::Categories), 2);
    }

    #[test]
    fn test_stale_computation_not_stored() {
        let cache = ViewCache::new();
        let started_at = cache.generation(View::Dashboard);
        cache.revalidate(View::Dashboard);

        let body = cache.store(View::Dashboard, started_at, json!({"stale": true}));
        assert_eq!(*body, json!({"stale": true}));
        assert!(cache.get(View::Dashboard).is_none());
    }

    #[tokio::test]
    async fn test_get_or_compute_runs_once() {
        let cache = ViewCache::new();
        let calls = std::sync::atomic::AtomicUsize::new(0);
        for _ in 0..3 {
            let body = cache
                .get_or_compute(View::Orders, || async {
                    calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    Ok::<_, std::convert::Infallible>(json!([]))
                })
                .await
                .unwrap();
            assert_eq!(*body, json!([]));
        }
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);

        cache.revalidate_all(&PRODUCT_VIEWS);
        assert!(cache.get(View::Orders).is_some());
    }
}
