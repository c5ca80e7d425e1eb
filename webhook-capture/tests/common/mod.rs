// Not every helper is used in every test, so we allow dead code
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::Request,
    response::Response,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;
use webhook_capture::{
    blob_store::{
        format_uploaded_at, BlobEntry, BlobError, BlobResult, BlobStore, InMemoryBlobStore,
        ListOptions, ListResult, PutResult, VercelBlobStore,
    },
    server,
    state::AppState,
};

/// Setup test logging
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// A store whose every call fails
pub struct FailingBlobStore;

#[async_trait]
impl BlobStore for FailingBlobStore {
    async fn put(&self, _pathname: &str, _body: Vec<u8>, _content_type: &str) -> BlobResult<PutResult> {
        Err(BlobError::Http("connection refused".to_string()))
    }

    async fn list(&self, _options: ListOptions) -> BlobResult<ListResult> {
        Err(BlobError::Api {
            status: 503,
            message: "store unavailable".to_string(),
        })
    }
}

/// Router plus the in-memory store behind it, if any
pub struct TestContext {
    pub router: Router,
    pub store: Option<Arc<InMemoryBlobStore>>,
}

impl TestContext {
    /// Storage disabled
    pub fn without_store() -> Self {
        setup_test_env();
        Self {
            router: server::app(AppState::default()),
            store: None,
        }
    }

    pub fn with_store() -> Self {
        setup_test_env();
        let store = Arc::new(InMemoryBlobStore::default());
        Self {
            router: server::app(AppState::new(Some(store.clone()))),
            store: Some(store),
        }
    }

    pub fn with_failing_store() -> Self {
        setup_test_env();
        Self {
            router: server::app(AppState::new(Some(Arc::new(FailingBlobStore)))),
            store: None,
        }
    }

    /// Backed by a Vercel Blob client pointed at `api_url`
    pub fn with_vercel_store(api_url: String) -> Self {
        setup_test_env();
        let store = VercelBlobStore::new("vercel_blob_rw_test".to_string(), Some(api_url));
        Self {
            router: server::app(AppState::new(Some(Arc::new(store)))),
            store: None,
        }
    }

    pub fn store(&self) -> &InMemoryBlobStore {
        self.store.as_deref().expect("context has no in-memory store")
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn send_request(
        &self,
        method: &str,
        uri: &str,
        headers: &[(&str, &str)],
        body: impl Into<Body>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(builder.body(body.into()).expect("valid request"))
            .await
    }

    pub async fn send_get_request(&self, uri: &str) -> Response {
        self.send_request("GET", uri, &[], Body::empty()).await
    }
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Raw response body text
pub async fn response_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

pub fn blob_entry(pathname: &str) -> BlobEntry {
    BlobEntry {
        pathname: pathname.to_string(),
        url: format!("memory://blobs/{pathname}"),
        uploaded_at: format_uploaded_at(Utc::now()),
        size: 64,
    }
}

/// Serves a Vercel Blob list endpoint that always returns `blobs`
pub async fn spawn_blob_api_stub(blobs: Value) -> String {
    let router = Router::new().route(
        "/",
        get(move || {
            let blobs = blobs.clone();
            async move { Json(json!({"blobs": blobs, "hasMore": false})) }
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
