//! Listing of persisted captures

use serde::Serialize;
use tracing::error;

use crate::{
    blob_store::{BlobEntry, BlobStore, ListOptions},
    capture::CAPTURE_PREFIX,
    types::AppError,
};

const DEFAULT_LIMIT: &str = "20";
/// Upper bound on entries returned by one listing
pub const MAX_LIMIT: i64 = 100;

const NOT_CONFIGURED: &str =
    "Blob store not configured. Set BLOB_READ_WRITE_TOKEN to persist and list webhooks.";

/// Listing envelope; which optional fields are set depends on the outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub blobs: Vec<BlobEntry>,
}

impl ListResponse {
    fn listed(blobs: Vec<BlobEntry>) -> Self {
        Self {
            ok: true,
            count: Some(blobs.len()),
            message: None,
            error: None,
            blobs,
        }
    }

    fn not_configured() -> Self {
        Self {
            ok: false,
            count: None,
            message: Some(NOT_CONFIGURED.to_string()),
            error: None,
            blobs: Vec::new(),
        }
    }

    fn failed(error: String) -> Self {
        Self {
            ok: false,
            count: None,
            message: None,
            error: Some(error),
            blobs: Vec::new(),
        }
    }
}

/// Parses the `limit` parameter (default 20) and caps it at [`MAX_LIMIT`]
///
/// There is no lower bound.
///
/// # Errors
///
/// Returns `AppError::invalid_limit` if the value is not an integer
pub fn parse_limit(raw: Option<&str>) -> Result<i64, AppError> {
    raw.unwrap_or(DEFAULT_LIMIT)
        .trim()
        .parse::<i64>()
        .map(|limit| limit.min(MAX_LIMIT))
        .map_err(|_| AppError::invalid_limit())
}

/// Keeps captures only, then truncates to `limit`
///
/// A negative limit counts from the end: `-2` drops the last two entries.
#[must_use]
pub fn select_captures(blobs: Vec<BlobEntry>, limit: i64) -> Vec<BlobEntry> {
    let mut captures: Vec<BlobEntry> = blobs
        .into_iter()
        .filter(|blob| blob.pathname.starts_with(CAPTURE_PREFIX))
        .collect();

    let keep = if limit >= 0 {
        usize::try_from(limit).unwrap_or(usize::MAX)
    } else {
        let dropped = usize::try_from(limit.unsigned_abs()).unwrap_or(usize::MAX);
        captures.len().saturating_sub(dropped)
    };
    captures.truncate(keep);
    captures
}

/// Lists persisted captures
///
/// Store failures are reported inside the envelope. The limit is only
/// inspected when a store is configured.
///
/// # Errors
///
/// Returns `AppError::invalid_limit` if `limit` is not an integer
pub async fn handle_list(
    store: Option<&dyn BlobStore>,
    limit: Option<&str>,
) -> Result<ListResponse, AppError> {
    let Some(store) = store else {
        return Ok(ListResponse::not_configured());
    };

    let limit = parse_limit(limit)?;

    match store.list(ListOptions { limit }).await {
        Ok(page) => Ok(ListResponse::listed(select_captures(page.blobs, limit))),
        Err(err) => {
            error!("Failed to list blobs: {err}");
            Ok(ListResponse::failed(err.to_string()))
        }
    }
}
