use std::env;
use std::fmt;

/// Which blob backend to use, resolved once at startup
#[derive(Clone, PartialEq, Eq)]
pub enum BlobStoreConfig {
    /// Vercel Blob, authenticated with a read/write token
    Vercel {
        token: String,
        /// Override for the API base URL
        api_url: Option<String>,
    },
    /// S3 bucket reached through the AWS SDK default credential chain
    S3 { bucket_name: String },
}

impl BlobStoreConfig {
    /// Resolves the backend from `BLOB_READ_WRITE_TOKEN`, `BLOB_API_URL` and
    /// `S3_BUCKET_NAME`. Returns `None` when storage is disabled.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_vars(
            env::var("BLOB_READ_WRITE_TOKEN").ok(),
            env::var("BLOB_API_URL").ok(),
            env::var("S3_BUCKET_NAME").ok(),
        )
    }

    /// A non-blank token wins over a bucket name; blank values count as unset.
    #[must_use]
    pub fn from_vars(
        token: Option<String>,
        api_url: Option<String>,
        bucket_name: Option<String>,
    ) -> Option<Self> {
        let non_blank = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(token) = non_blank(token) {
            return Some(Self::Vercel {
                token,
                api_url: non_blank(api_url),
            });
        }

        non_blank(bucket_name).map(|bucket_name| Self::S3 { bucket_name })
    }
}

// The token must never end up in logs.
impl fmt::Debug for BlobStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vercel { api_url, .. } => f
                .debug_struct("Vercel")
                .field("token", &"<redacted>")
                .field("api_url", api_url)
                .finish(),
            Self::S3 { bucket_name } => f
                .debug_struct("S3")
                .field("bucket_name", bucket_name)
                .finish(),
        }
    }
}
