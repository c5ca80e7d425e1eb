use tracing::{info, warn};

use super::CaptureRecord;
use crate::blob_store::{BlobResult, BlobStore};

/// Key prefix shared by every persisted capture
pub const CAPTURE_PREFIX: &str = "webhooks/earnings/";

/// `webhooks/earnings/2025-02-01T10-20-30-123456Z.json`
#[must_use]
pub fn storage_key(record: &CaptureRecord) -> String {
    format!(
        "{CAPTURE_PREFIX}{}.json",
        record.received_at_string().replace([':', '.'], "-")
    )
}

/// Writes `record` to the store as indented JSON
///
/// Returns the key it was written under, or `None` when there is no store or
/// the write failed. Failures are logged, never returned.
pub async fn persist_record(store: Option<&dyn BlobStore>, record: &CaptureRecord) -> Option<String> {
    let store = store?;

    match write_record(store, record).await {
        Ok(key) => {
            info!("Persisted capture to {key}");
            Some(key)
        }
        Err(err) => {
            warn!("Failed to persist capture: {err}");
            None
        }
    }
}

async fn write_record(store: &dyn BlobStore, record: &CaptureRecord) -> BlobResult<String> {
    let key = storage_key(record);
    let body = serde_json::to_vec_pretty(record)?;
    store
        .put(&key, body, mime::APPLICATION_JSON.as_ref())
        .await?;
    Ok(key)
}
