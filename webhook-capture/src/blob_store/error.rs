//! Error types for blob store operations

use aws_sdk_s3::{
    config::http::HttpResponse,
    error::{DisplayErrorContext, SdkError},
    operation::{list_objects_v2::ListObjectsV2Error, put_object::PutObjectError},
};
use thiserror::Error;

/// Result type for blob store operations
pub type BlobResult<T> = Result<T, BlobError>;

/// Errors that can occur while talking to a blob store
#[derive(Error, Debug)]
pub enum BlobError {
    /// Transport-level failure reaching the blob API
    #[error("Blob store HTTP error: {0}")]
    Http(String),

    /// The blob API answered with a non-success status
    #[error("Blob store API error ({status}): {message}")]
    Api {
        /// HTTP status returned by the API
        status: u16,
        /// Message extracted from the error body
        message: String,
    },

    /// The blob API answered with a body we could not decode
    #[error("Invalid blob store response: {0}")]
    InvalidResponse(String),

    /// S3 service error
    #[error("S3 service error: {0}")]
    S3Error(String),

    /// Upstream service error (5xx from S3)
    #[error("Upstream service error: {0}")]
    UpstreamError(String),

    /// Payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for BlobError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::InvalidResponse(error.to_string())
        } else {
            Self::Http(error.to_string())
        }
    }
}

impl From<serde_json::Error> for BlobError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Every S3 operation error renders through `DisplayErrorContext`
fn from_sdk_error<E>(error: &SdkError<E, HttpResponse>) -> BlobError
where
    E: std::error::Error + 'static,
{
    let message = DisplayErrorContext(error).to_string();
    match error {
        SdkError::ServiceError(err) if err.raw().status().as_u16() >= 500 => {
            BlobError::UpstreamError(message)
        }
        _ => BlobError::S3Error(message),
    }
}

impl From<SdkError<PutObjectError>> for BlobError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        from_sdk_error(&error)
    }
}

impl From<SdkError<ListObjectsV2Error>> for BlobError {
    fn from(error: SdkError<ListObjectsV2Error>) -> Self {
        from_sdk_error(&error)
    }
}
