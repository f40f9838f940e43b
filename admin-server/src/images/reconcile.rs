//! Startup sweep that reconciles image files with product rows
//!
//! Files nobody references are deleted. Rows whose file is gone are only
//! reported. Must run before requests are served: an add in flight between
//! its file write and its row insert would look like an orphan.

use super::ImageStore;
use crate::db::repository::product;
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashSet;

/// A product row pointing at a missing file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingImage {
    pub product_id: String,
    pub img_path: String,
}

/// Outcome of one sweep
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    /// Public paths of deleted orphan files
    pub orphans_removed: Vec<String>,
    pub dangling: Vec<DanglingImage>,
    /// Orphans that could not be deleted
    pub failed_removals: usize,
}

/// Run the sweep; never fails, problems are logged and skipped
pub async fn reconcile(pool: &SqlitePool, store: &dyn ImageStore) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    let rows = match product::all_img_paths(pool).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "Image reconciliation skipped: cannot read products");
            return report;
        }
    };
    let files = match store.list().await {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!(error = %e, "Image reconciliation skipped: cannot list images");
            return report;
        }
    };

    let referenced: HashSet<&str> = rows.iter().map(|(_, path)| path.as_str()).collect();
    for file in files.iter().filter(|f| !referenced.contains(f.as_str())) {
        match store.remove(file).await {
            Ok(()) => report.orphans_removed.push(file.clone()),
            Err(e) => {
                tracing::warn!(path = %file, error = %e, "Failed to delete orphan image");
                report.failed_removals += 1;
            }
        }
    }

    let on_disk: HashSet<&str> = files.iter().map(String::as_str).collect();
    for (product_id, img_path) in rows {
        if !on_disk.contains(img_path.as_str()) {
            tracing::warn!(product_id = %product_id, img_path = %img_path, "Product image missing on disk");
            report.dangling.push(DanglingImage {
                product_id,
                img_path,
            });
        }
    }

    if !report.orphans_removed.is_empty() || !report.dangling.is_empty() {
        tracing::info!(
            orphans = report.orphans_removed.len(),
            dangling = report.dangling.len(),
            "Image reconciliation finished"
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::product::ProductWrite;
    use crate::db::repository::test_support::test_pool;
    use crate::db::repository::category;
    use crate::images::{ImageUpload, LocalImageStore, UploadedFile};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_removes_orphans_and_reports_dangling() {
        let pool = test_pool().await;
        let dir = TempDir::new().unwrap();
        let store = LocalImageStore::new(dir.path(), "products");

        let upload = |name: &str| ImageUpload::validated(UploadedFile::new(name, "image/png", &b"png"[..]));
        let kept = store.store(&upload("kept.png")).await.unwrap();
        let orphan = store.store(&upload("orphan.png")).await.unwrap();

        let cat = category::create(&pool, "A", "a").await.unwrap();
        let write = |name: &str| ProductWrite {
            name: name.into(),
            description: "Yazi yazar.".into(),
            price_in_cents: 100,
            category_id: cat.id.clone(),
        };
        product::create(&pool, write("Kept"), &kept).await.unwrap();
        let lost = product::create(&pool, write("Lost"), "/products/lost.png").await.unwrap();

        let report = reconcile(&pool, &store).await;

        assert_eq!(report.orphans_removed, vec![orphan.clone()]);
        assert_eq!(report.failed_removals, 0);
        assert_eq!(
            report.dangling,
            vec![DanglingImage {
                product_id: lost.id,
                img_path: "/products/lost.png".into(),
            }]
        );
        assert!(store.exists(&kept).await.unwrap());
        assert!(!store.exists(&orphan).await.unwrap());
    }
}
