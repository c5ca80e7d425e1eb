//! S3-backed blob storage
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, types::Object, Client as S3Client};
use chrono::{DateTime, Utc};

use super::{
    format_uploaded_at, BlobEntry, BlobError, BlobResult, BlobStore, ListOptions, ListResult,
    PutResult,
};

/// Blob store client for S3 operations
pub struct S3BlobStore {
    s3_client: Arc<S3Client>,
    bucket_name: String,
    public_base_url: String,
}

impl S3BlobStore {
    /// Creates a new S3 blob store
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - Bucket that holds the captures
    /// * `public_base_url` - URL prefix used to build each object's `url`
    #[must_use]
    pub fn new(s3_client: Arc<S3Client>, bucket_name: String, public_base_url: String) -> Self {
        Self {
            s3_client,
            bucket_name,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }

    fn to_entry(&self, object: &Object) -> Option<BlobEntry> {
        let key = object.key()?;
        let modified = object.last_modified()?;
        let uploaded_at: DateTime<Utc> =
            DateTime::from_timestamp(modified.secs(), modified.subsec_nanos())?;

        Some(BlobEntry {
            pathname: key.to_string(),
            url: self.object_url(key),
            uploaded_at: format_uploaded_at(uploaded_at),
            size: object
                .size()
                .and_then(|size| u64::try_from(size).ok())
                .unwrap_or_default(),
        })
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(
        &self,
        pathname: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> BlobResult<PutResult> {
        self.s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(pathname)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await?;

        Ok(PutResult {
            pathname: pathname.to_string(),
            url: self.object_url(pathname),
        })
    }

    /// Objects without a key or modification time are skipped.
    async fn list(&self, options: ListOptions) -> BlobResult<ListResult> {
        let max_keys = i32::try_from(options.limit)
            .map_err(|_| BlobError::InvalidInput(format!("limit out of range: {}", options.limit)))?;

        let response = self
            .s3_client
            .list_objects_v2()
            .bucket(&self.bucket_name)
            .max_keys(max_keys)
            .send()
            .await?;

        let blobs = response
            .contents()
            .iter()
            .filter_map(|object| self.to_entry(object))
            .collect();

        Ok(ListResult { blobs })
    }
}
