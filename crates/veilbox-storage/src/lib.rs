//! # veilbox-storage
//!
//! Blob storage backends for Veilbox: local filesystem and S3-compatible
//! object storage behind the [`veilbox_core::traits::storage::BlobStore`]
//! trait, plus storage-key generation for registered file slots.

pub mod factory;
pub mod keys;
pub mod providers;

pub use factory::blob_store_from_config;
