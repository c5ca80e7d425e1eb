mod health;
mod webhook;
mod webhooks_list;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Creates the router with all handler routes
pub fn handler() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::handler))
        .route(
            "/api/webhook",
            get(webhook::info)
                .post(webhook::capture)
                .put(webhook::capture),
        )
        .route("/api/webhooks/list", get(webhooks_list::handler))
}
