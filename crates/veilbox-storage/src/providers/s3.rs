//! S3-compatible object storage blob store.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::debug;

use veilbox_core::config::storage::S3StorageConfig;
use veilbox_core::error::{AppError, ErrorKind};
use veilbox_core::result::AppResult;
use veilbox_core::traits::storage::BlobStore;

/// Blob store backed by an S3-compatible object store.
///
/// Path-style addressing is forced so custom endpoints (MinIO,
/// DigitalOcean Spaces) work without per-bucket DNS.
#[derive(Debug, Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
}

impl S3BlobStore {
    /// Create a new S3 blob store from configuration.
    pub fn new(config: &S3StorageConfig) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::configuration("S3 bucket name is not configured"));
        }

        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "veilbox-config",
        );

        let mut builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true);

        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(&config.endpoint);
        }

        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = %config.endpoint,
            "Initializing S3 blob store"
        );

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(true),
            Err(_) => Ok(false),
        }
    }

    async fn put(&self, key: &str, data: Bytes) -> AppResult<()> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to write blob: {key}"),
                    e,
                )
            })?;

        debug!(key, bytes = size, "Wrote blob");
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Bytes> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|s| s.is_no_such_key()) {
                    AppError::not_found(format!("Blob not found: {key}"))
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to read blob: {key}"),
                        e,
                    )
                }
            })?;

        let data = response.body.collect().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to collect blob body: {key}"),
                e,
            )
        })?;

        Ok(data.into_bytes())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|s| s.is_not_found()) => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to check blob: {key}"),
                e,
            )),
        }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete blob: {key}"),
                    e,
                )
            })?;
        Ok(())
    }
}
