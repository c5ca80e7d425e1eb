use axum::extract::{RawQuery, State};
use tracing::instrument;

use crate::{
    capture::parse_query_string,
    listing::{self, ListResponse},
    state::AppState,
    types::{AppError, PrettyJson},
};

/// Lists persisted captures, `?limit=N` (default 20, at most 100)
///
/// # Errors
///
/// Returns `AppError` (400) when `limit` is not an integer
#[instrument(skip(app_state))]
pub async fn handler(
    State(app_state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<PrettyJson<ListResponse>, AppError> {
    let params = query.as_deref().map(parse_query_string).unwrap_or_default();
    let limit = params
        .get("limit")
        .and_then(|values| values.first())
        .map(String::as_str);

    listing::handle_list(app_state.blob_store(), limit)
        .await
        .map(PrettyJson)
}
