//! Capture of inbound webhook requests
//!
//! `handle_capture` is the whole POST/PUT contract: build the record, try to
//! persist it, echo it back. It never fails.

mod body;
mod persist;
mod record;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

pub use body::read_body;
pub use persist::{persist_record, storage_key, CAPTURE_PREFIX};
pub use record::{parse_query_string, CaptureRecord, CaptureRequest};

use crate::blob_store::BlobStore;

/// Fixed usage description served on GET
#[derive(Debug, Clone, Serialize)]
pub struct WebhookInfo {
    pub status: &'static str,
    pub webhook: &'static str,
    pub usage: &'static str,
    pub saved: &'static str,
}

/// Response to a captured request
#[derive(Debug, Clone, Serialize)]
pub struct CaptureResponse {
    pub ok: bool,
    pub message: &'static str,
    pub captured: CaptureRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
}

#[must_use]
pub const fn webhook_info() -> WebhookInfo {
    WebhookInfo {
        status: "ok",
        webhook: "Send POST requests to this URL to capture payloads.",
        usage: "Configure this URL as your webhook in earnings call.biz. Each POST will be captured and returned in the response.",
        saved: "Set BLOB_READ_WRITE_TOKEN to persist payloads; then GET /api/webhooks/list to see them.",
    }
}

/// Captures `request`, persists it when a store is available, and echoes it
pub async fn handle_capture(store: Option<&dyn BlobStore>, request: CaptureRequest) -> CaptureResponse {
    let captured = CaptureRecord::from_request(request, Utc::now());
    info!(
        "Captured {} {} ({} body bytes, json: {})",
        captured.method(),
        captured.path(),
        captured.body_raw().len(),
        captured.body_parsed().is_some()
    );

    let saved_to = persist_record(store, &captured).await;

    CaptureResponse {
        ok: true,
        message: "Webhook received and captured.",
        captured,
        saved_to,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob_store::InMemoryBlobStore;
    use axum::http::{HeaderMap, HeaderValue, Method};
    use serde_json::json;

    fn request(method: Method, body: &str) -> CaptureRequest {
        let mut headers = HeaderMap::new();
        headers.insert("x-test", HeaderValue::from_static("1"));
        CaptureRequest {
            method,
            target: "/api/webhook?source=test".to_string(),
            headers,
            body: body.as_bytes().to_vec(),
        }
    }

    #[tokio::test]
    async fn test_capture_without_store_has_no_saved_to() {
        let response = handle_capture(None, request(Method::POST, r#"{"a":1}"#)).await;

        assert!(response.ok);
        assert_eq!(response.message, "Webhook received and captured.");
        assert_eq!(response.saved_to, None);
        assert_eq!(response.captured.body_parsed(), Some(&json!({"a": 1})));

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("saved_to").is_none());
    }

    #[tokio::test]
    async fn test_capture_with_store_reports_key() {
        let store = InMemoryBlobStore::default();

        let response = handle_capture(Some(&store), request(Method::POST, "not json")).await;

        let key = response.saved_to.clone().unwrap();
        assert!(key.starts_with(CAPTURE_PREFIX));
        assert_eq!(key, storage_key(&response.captured));
        assert!(store.get(&key).is_some());
        assert_eq!(response.captured.body_raw(), "not json");
    }

    #[tokio::test]
    async fn test_post_and_put_differ_only_in_method_and_time() {
        let post = handle_capture(None, request(Method::POST, r#"{"a":[1,2]}"#)).await;
        let put = handle_capture(None, request(Method::PUT, r#"{"a":[1,2]}"#)).await;

        let mut post = serde_json::to_value(&post.captured).unwrap();
        let mut put = serde_json::to_value(&put.captured).unwrap();
        assert_eq!(post["method"], "POST");
        assert_eq!(put["method"], "PUT");

        for value in [&mut post, &mut put] {
            let object = value.as_object_mut().unwrap();
            object.remove("method");
            object.remove("received_at");
        }
        assert_eq!(post, put);
    }

    #[test]
    fn test_webhook_info() {
        let info = serde_json::to_value(webhook_info()).unwrap();
        assert_eq!(info["status"], "ok");
        for field in ["webhook", "usage", "saved"] {
            assert!(info[field].is_string());
        }
    }
}
