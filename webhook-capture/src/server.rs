use axum::Router;
use tokio::{net::TcpListener, signal};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{routes, state::AppState, types::Environment};

/// Builds the application router with its state attached
pub fn app(state: AppState) -> Router {
    routes::handler().with_state(state)
}

/// Starts the server with the given environment and dependencies
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(environment: Environment, state: AppState) -> anyhow::Result<()> {
    let router = app(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(environment.request_timeout()));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], environment.port()?));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🔄 Webhook capture started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => tracing::error!("Failed to install SIGTERM handler: {err}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
