use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use super::{
    format_uploaded_at, BlobEntry, BlobResult, BlobStore, ListOptions, ListResult, PutResult,
};

/// In-process blob store for tests. Lists in insertion order.
pub struct InMemoryBlobStore {
    // Entry metadata plus the stored bytes
    blobs: Mutex<Vec<(BlobEntry, Vec<u8>)>>,
    base_url: String,
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new("memory://blobs")
    }
}

impl InMemoryBlobStore {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            blobs: Mutex::new(Vec::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(BlobEntry, Vec<u8>)>> {
        self.blobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds metadata for a blob without content, for seeding listings
    pub fn insert_entry(&self, entry: BlobEntry) {
        self.lock().push((entry, Vec::new()));
    }

    /// Content stored under `pathname`
    #[must_use]
    pub fn get(&self, pathname: &str) -> Option<Vec<u8>> {
        self.lock()
            .iter()
            .find(|(entry, _)| entry.pathname == pathname)
            .map(|(_, body)| body.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(
        &self,
        pathname: &str,
        body: Vec<u8>,
        _content_type: &str,
    ) -> BlobResult<PutResult> {
        let entry = BlobEntry {
            pathname: pathname.to_string(),
            url: format!("{}/{pathname}", self.base_url),
            uploaded_at: format_uploaded_at(Utc::now()),
            size: body.len() as u64,
        };
        let result = PutResult {
            pathname: entry.pathname.clone(),
            url: entry.url.clone(),
        };

        let mut blobs = self.lock();
        blobs.retain(|(existing, _)| existing.pathname != pathname);
        blobs.push((entry, body));

        Ok(result)
    }

    /// A positive limit caps the page; anything else returns every entry.
    async fn list(&self, options: ListOptions) -> BlobResult<ListResult> {
        let blobs = self.lock();
        let take = usize::try_from(options.limit)
            .ok()
            .filter(|limit| *limit > 0)
            .unwrap_or(blobs.len());

        Ok(ListResult {
            blobs: blobs.iter().take(take).map(|(entry, _)| entry.clone()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_and_get() {
        let store = InMemoryBlobStore::default();
        let result = store
            .put("webhooks/earnings/a.json", b"hello".to_vec(), "application/json")
            .await
            .unwrap();

        assert_eq!(result.url, "memory://blobs/webhooks/earnings/a.json");
        assert_eq!(store.get("webhooks/earnings/a.json"), Some(b"hello".to_vec()));
        assert_eq!(store.get("nope.json"), None);
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_pathname() {
        let store = InMemoryBlobStore::default();
        store.put("a.json", b"one".to_vec(), "application/json").await.unwrap();
        store.put("a.json", b"two".to_vec(), "application/json").await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a.json"), Some(b"two".to_vec()));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order_and_caps() {
        let store = InMemoryBlobStore::default();
        for name in ["c", "a", "b"] {
            store
                .put(&format!("{name}.json"), name.as_bytes().to_vec(), "application/json")
                .await
                .unwrap();
        }

        let page = store.list(ListOptions { limit: 2 }).await.unwrap();
        let names: Vec<_> = page.blobs.iter().map(|b| b.pathname.as_str()).collect();
        assert_eq!(names, ["c.json", "a.json"]);

        let all = store.list(ListOptions { limit: 0 }).await.unwrap();
        assert_eq!(all.blobs.len(), 3);
    }
}
