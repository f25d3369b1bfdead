//! Config-driven blob store construction.

use std::sync::Arc;

use veilbox_core::config::storage::StorageConfig;
use veilbox_core::error::AppError;
use veilbox_core::result::AppResult;
use veilbox_core::traits::storage::BlobStore;

use crate::providers::{LocalBlobStore, S3BlobStore};

/// Build the configured blob store backend.
pub async fn blob_store_from_config(config: &StorageConfig) -> AppResult<Arc<dyn BlobStore>> {
    match config.provider.as_str() {
        "local" => Ok(Arc::new(LocalBlobStore::new(&config.local.root_path).await?)),
        "s3" => Ok(Arc::new(S3BlobStore::new(&config.s3)?)),
        other => Err(AppError::configuration(format!(
            "Unknown storage provider: {other}"
        ))),
    }
}
