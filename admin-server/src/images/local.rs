//! Filesystem-backed image store

use super::{ImageResult, ImageStore, ImageStoreError, ImageUpload};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Images under `PUBLIC_DIR/IMAGE_DIR`, served as `/{IMAGE_DIR}/{file}`
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    url_dir: String,
}

impl LocalImageStore {
    /// `root` is the directory on disk, `url_dir` the public path segment
    pub fn new(root: impl Into<PathBuf>, url_dir: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_dir: url_dir.into().trim_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Public path for a file name in this store
    pub fn public_path(&self, file_name: &str) -> String {
        format!("/{}/{}", self.url_dir, file_name)
    }

    /// Map a public path back to its file on disk
    ///
    /// Only plain file names directly below `/{IMAGE_DIR}/` are accepted.
    pub fn resolve(&self, public_path: &str) -> ImageResult<PathBuf> {
        let invalid = || ImageStoreError::InvalidPath(public_path.to_string());
        let name = public_path
            .strip_prefix('/')
            .and_then(|p| p.strip_prefix(self.url_dir.as_str()))
            .and_then(|p| p.strip_prefix('/'))
            .ok_or_else(invalid)?;
        if !is_plain_file_name(name) {
            return Err(invalid());
        }
        Ok(self.root.join(name))
    }

    fn io_error(path: &Path, source: std::io::Error) -> ImageStoreError {
        ImageStoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A single path component that is not `.` or `..`
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Reduce a client-supplied file name to a safe single component
///
/// Directory parts are dropped and anything outside letters, digits,
/// `.`, `-` and `_` becomes `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, image: &ImageUpload) -> ImageResult<String> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Self::io_error(&self.root, e))?;

        let file_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(image.file_name()));
        let path = self.root.join(&file_name);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| Self::io_error(&path, e))?;
        let mut written = file.write_all(image.bytes()).await;
        if written.is_ok() {
            written = file.flush().await;
        }
        if let Err(e) = written {
            drop(file);
            let _ = fs::remove_file(&path).await;
            return Err(Self::io_error(&path, e));
        }

        tracing::debug!(file = %file_name, size = image.bytes().len(), "Image stored");
        Ok(self.public_path(&file_name))
    }

    async fn remove(&self, path: &str) -> ImageResult<()> {
        let file = self.resolve(path)?;
        fs::remove_file(&file)
            .await
            .map_err(|e| Self::io_error(&file, e))?;
        tracing::debug!(path = %path, "Image removed");
        Ok(())
    }

    async fn exists(&self, path: &str) -> ImageResult<bool> {
        let file = self.resolve(path)?;
        fs::try_exists(&file)
            .await
            .map_err(|e| Self::io_error(&file, e))
    }

    async fn list(&self) -> ImageResult<Vec<String>> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::io_error(&self.root, e)),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Self::io_error(&self.root, e))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if let (true, Some(name)) = (is_file, entry.file_name().to_str()) {
                paths.push(self.public_path(name));
            }
        }
        paths.sort();
        Ok(paths)
    }
}
