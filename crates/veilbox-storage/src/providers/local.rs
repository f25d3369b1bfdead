//! Local filesystem blob store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use veilbox_core::error::{AppError, ErrorKind};
use veilbox_core::result::AppResult;
use veilbox_core::traits::storage::BlobStore;

/// Blob store rooted at a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all stored blobs.
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a new local blob store rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a storage key to an absolute path within the root.
    fn resolve(&self, key: &str) -> PathBuf {
        let clean = key.trim_start_matches('/');
        self.root.join(clean)
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }

    async fn put(&self, key: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(key);
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write blob: {key}"),
                e,
            )
        })?;

        debug!(key, bytes = data.len(), "Wrote blob");
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(key);
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Blob not found: {key}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read blob: {key}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_path = self.resolve(key);
        Ok(full_path.exists())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_path = self.resolve(key);
        if full_path.exists() {
            fs::remove_file(&full_path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete blob: {key}"),
                    e,
                )
            })?;
        }
        Ok(())
    }
}
