use std::fmt::Display;

use axum::body::Bytes;
use futures::{Stream, StreamExt};
use tracing::debug;

/// Collects a request body stream into memory
///
/// A transport error (peer reset, broken connection, truncated framing) ends
/// the body: whatever was read up to that point is returned.
pub async fn read_body<S, E>(stream: S) -> Vec<u8>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Display,
{
    let mut stream = std::pin::pin!(stream);
    let mut body = Vec::new();

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => body.extend_from_slice(&bytes),
            Err(err) => {
                debug!("Request body ended early after {} bytes: {err}", body.len());
                break;
            }
        }
    }

    body
}
