//! Entry point for the folio-server binary.

use std::sync::Arc;

use folio_server::{PageSource, ServerConfig, build_app, state::AppState, state::SharedStore};
use folio_store::{MemoryPageStore, PgPageStore, StoreConfig};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    tracing::info!("Starting folio-server");
    tracing::info!(
        "Configuration: port={}, log_level={}, route_segment={:?}, per_page={}",
        config.port,
        config.log_level,
        config.route_segment.as_str(),
        config.per_page
    );

    let store = open_store(&config.source).await?;

    // Build application state
    let state = AppState::new(store, config.clone());
    let app = build_app(state);

    // Create listener
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Open the configured page store.
async fn open_store(source: &PageSource) -> Result<SharedStore, Box<dyn std::error::Error>> {
    match source {
        PageSource::Postgres { database_url } => {
            let store_config = StoreConfig::from_lookup(|key| match key {
                "DATABASE_URL" => Some(database_url.clone()),
                _ => std::env::var(key).ok(),
            })?;
            let store = PgPageStore::connect(store_config).await?;
            tracing::info!("Connected to database");
            Ok(Arc::new(store))
        }
        PageSource::SeedFile(path) => {
            let json = tokio::fs::read_to_string(path).await?;
            let store = MemoryPageStore::from_json(&json)?;
            tracing::info!(path = %path.display(), pages = store.len().await, "Loaded seed file");
            Ok(Arc::new(store))
        }
    }
}

/// Initialize the tracing subscriber.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
