//! Vercel Blob HTTP API client

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, Response};
use serde::Deserialize;
use tracing::debug;

use super::{BlobEntry, BlobError, BlobResult, BlobStore, ListOptions, ListResult, PutResult};

const DEFAULT_API_URL: &str = "https://blob.vercel-storage.com";
const API_VERSION: &str = "7";

/// Blob store backed by Vercel Blob
pub struct VercelBlobStore {
    http: Client,
    token: String,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    url: String,
    pathname: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    blobs: Vec<BlobEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl VercelBlobStore {
    /// Creates a client for the given read/write token
    ///
    /// `api_url` defaults to the public Vercel Blob endpoint.
    #[must_use]
    pub fn new(token: String, api_url: Option<String>) -> Self {
        let api_url = api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            http: Client::new(),
            token,
            api_url,
        }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    async fn error_from_response(response: Response) -> BlobError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|body| body.error.message)
            .unwrap_or(text);

        BlobError::Api { status, message }
    }
}

#[async_trait]
impl BlobStore for VercelBlobStore {
    async fn put(
        &self,
        pathname: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> BlobResult<PutResult> {
        debug!("Uploading blob {pathname} ({} bytes)", body.len());

        let response = self
            .http
            .put(format!("{}/{}", self.api_url, pathname))
            .header(AUTHORIZATION, self.bearer())
            .header("x-api-version", API_VERSION)
            .header("x-content-type", content_type)
            .header("x-add-random-suffix", "0")
            .header("access", "public")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let uploaded: PutResponse = response.json().await?;
        Ok(PutResult {
            pathname: uploaded.pathname,
            url: uploaded.url,
        })
    }

    async fn list(&self, options: ListOptions) -> BlobResult<ListResult> {
        let response = self
            .http
            .get(&self.api_url)
            .header(AUTHORIZATION, self.bearer())
            .header("x-api-version", API_VERSION)
            .query(&[("limit", options.limit.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let page: ListResponse = response.json().await?;
        Ok(ListResult { blobs: page.blobs })
    }
}
