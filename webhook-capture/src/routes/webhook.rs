use axum::{
    body::Body,
    extract::{OriginalUri, State},
    http::{HeaderMap, Method},
};
use tracing::instrument;

use crate::{
    capture::{self, CaptureRequest, CaptureResponse, WebhookInfo},
    state::AppState,
    types::PrettyJson,
};

/// Usage information; nothing is captured
#[allow(clippy::unused_async)]
pub async fn info() -> PrettyJson<WebhookInfo> {
    PrettyJson(capture::webhook_info())
}

/// Captures a POST or PUT and echoes it back. Always 200.
#[instrument(skip_all)]
pub async fn capture(
    State(app_state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Body,
) -> PrettyJson<CaptureResponse> {
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);
    let body = capture::read_body(body.into_data_stream()).await;

    let request = CaptureRequest {
        method,
        target,
        headers,
        body,
    };

    PrettyJson(capture::handle_capture(app_state.blob_store(), request).await)
}
