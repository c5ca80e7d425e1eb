use webhook_capture::{blob_store, server, state::AppState, types::Environment};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // Configure logging format based on environment
    // Use JSON format for staging/production, regular format for development
    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        fmt().with_env_filter(EnvFilter::from_default_env()).init();
    }

    let blob_store = match environment.blob_store_config() {
        Some(config) => Some(blob_store::connect(&environment, config).await),
        None => {
            tracing::warn!("No blob store configured, captures will not be persisted");
            None
        }
    };

    server::start(environment, AppState::new(blob_store)).await
}
