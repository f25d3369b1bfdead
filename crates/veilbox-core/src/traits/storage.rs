//! Blob store trait for pluggable binary storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for blob storage backends.
///
/// Implementations exist for the local filesystem and S3-compatible
/// object stores. The [`BlobStore`] trait is defined here in
/// `veilbox-core` and implemented in `veilbox-storage`.
///
/// `put` has overwrite semantics with no partial-write visibility:
/// either the whole payload is stored under the key or the call fails.
/// Repeating a `put` for the same key is therefore always safe.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Write the payload under the given key, overwriting unconditionally.
    async fn put(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Read the payload stored under the given key.
    async fn get(&self, key: &str) -> AppResult<Bytes>;

    /// Check whether an object exists under the given key.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Delete the object under the given key. Missing keys are not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
