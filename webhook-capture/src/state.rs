//! Application state management

use std::sync::Arc;

use crate::blob_store::BlobStore;

/// Application state shared across handlers
#[derive(Clone, Default)]
pub struct AppState {
    /// Blob store for persisting captures; `None` when storage is disabled
    blob_store: Option<Arc<dyn BlobStore>>,
}

impl AppState {
    #[must_use]
    pub fn new(blob_store: Option<Arc<dyn BlobStore>>) -> Self {
        Self { blob_store }
    }

    #[must_use]
    pub fn blob_store(&self) -> Option<&dyn BlobStore> {
        self.blob_store.as_deref()
    }
}
