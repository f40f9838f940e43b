//! Product image files
//!
//! Images live in one public directory and are addressed by their public
//! path (`/{IMAGE_DIR}/{uuid}-{file name}`), which is what product rows store.

pub mod local;
pub mod reconcile;

pub use local::LocalImageStore;
pub use reconcile::{ReconcileReport, reconcile};

use async_trait::async_trait;
use axum::body::Bytes;
use std::path::PathBuf;
use thiserror::Error;

/// Image store errors
#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Public path outside the image directory, or with traversal
    #[error("invalid image path: {0}")]
    InvalidPath(String),
}

pub type ImageResult<T> = Result<T, ImageStoreError>;

/// A file field as received from a form, not yet validated
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub file_name: String,
    /// Declared content type, e.g. `image/jpeg`
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A non-empty jpg/jpeg/png upload that passed validation
#[derive(Debug, Clone)]
pub struct ImageUpload(UploadedFile);

impl ImageUpload {
    /// Only the validation layer vouches for an upload
    pub(crate) fn validated(file: UploadedFile) -> Self {
        Self(file)
    }

    pub fn file_name(&self) -> &str {
        &self.0.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.0.content_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.0.bytes
    }
}

/// Storage for product images
#[async_trait]
pub trait ImageStore: Send + Sync + std::fmt::Debug {
    /// Write a new file under a fresh name; returns its public path
    async fn store(&self, image: &ImageUpload) -> ImageResult<String>;

    /// Delete the file behind `path`; a missing file is an error
    async fn remove(&self, path: &str) -> ImageResult<()>;

    async fn exists(&self, path: &str) -> ImageResult<bool>;

    /// Public paths of every file currently in the store
    async fn list(&self) -> ImageResult<Vec<String>>;
}
