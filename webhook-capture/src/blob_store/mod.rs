//! Blob storage used to persist captured webhooks
//!
//! The store is optional. When no backend is configured the service still
//! captures and echoes requests, it just never persists or lists them.

mod config;
mod error;
#[cfg(any(test, feature = "test-utils"))]
mod memory;
mod s3;
mod vercel;

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub use config::BlobStoreConfig;
pub use error::{BlobError, BlobResult};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryBlobStore;
pub use s3::S3BlobStore;
pub use vercel::VercelBlobStore;

use crate::types::Environment;

/// Metadata of a stored blob, as reported by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobEntry {
    /// Key of the blob inside the store
    pub pathname: String,
    /// Public URL of the blob
    pub url: String,
    /// When the blob was written, exactly as the store reports it
    pub uploaded_at: String,
    /// Size in bytes
    pub size: u64,
}

/// Renders an upload time the way Vercel Blob does, e.g. `2025-02-01T10:20:30.000Z`
///
/// Only backends that hold a native timestamp use this. Entries read from
/// Vercel Blob keep the store's own string.
#[must_use]
pub fn format_uploaded_at(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Options for a list call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Number of entries requested. Forwarded to the backend as is.
    pub limit: i64,
}

/// Blob metadata returned by a list call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListResult {
    pub blobs: Vec<BlobEntry>,
}

/// Location of a freshly written blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutResult {
    pub pathname: String,
    pub url: String,
}

/// Object store capability: write a blob, list blobs
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Writes `body` under `pathname`, overwriting any existing blob
    ///
    /// # Errors
    ///
    /// Returns a `BlobError` if the backend rejects or fails the write
    async fn put(&self, pathname: &str, body: Vec<u8>, content_type: &str)
        -> BlobResult<PutResult>;

    /// Lists blobs in the order the backend returns them
    ///
    /// # Errors
    ///
    /// Returns a `BlobError` if the backend rejects or fails the query
    async fn list(&self, options: ListOptions) -> BlobResult<ListResult>;
}

/// Builds the store described by `config`
pub async fn connect(environment: &Environment, config: BlobStoreConfig) -> Arc<dyn BlobStore> {
    match config {
        BlobStoreConfig::Vercel { token, api_url } => {
            tracing::info!("Using Vercel Blob store");
            Arc::new(VercelBlobStore::new(token, api_url))
        }
        BlobStoreConfig::S3 { bucket_name } => {
            tracing::info!("Using S3 blob store, bucket: {bucket_name}");
            let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
            let public_base_url = environment.s3_public_base_url(&bucket_name);
            Arc::new(S3BlobStore::new(s3_client, bucket_name, public_base_url))
        }
    }
}
