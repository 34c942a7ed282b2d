//! Entry point for the stickynotes-server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use stickynotes_server::{
    build_app,
    config::{LogFormat, ServerConfig},
    state::AppState,
};
use stickynotes_store::{NoteStore, Store, StoreConfig, StoreError, UnavailableStore};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ServerConfig::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level, config.log_format);

    tracing::info!("Starting stickynotes-server");
    tracing::info!(
        "Configuration: port={}, log_level={}, create_rate_limit={}/{}s",
        config.port,
        config.log_level,
        config.create_rate_limit,
        config.create_rate_window.as_secs()
    );
    for name in config.missing_secrets() {
        tracing::warn!("{} is not set; admin login and admin routes will fail", name);
    }

    // Connect to database
    let store = connect_store().await?;

    // Build application state
    let addr = config.socket_addr();
    let state = AppState::new(store, config);
    let app = build_app(state)?;

    // Create listener
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    // Run server with graceful shutdown
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Open the PostgreSQL store, or a stand-in that fails every call when no
/// database is configured.
async fn connect_store() -> Result<Arc<dyn NoteStore>, StoreError> {
    match StoreConfig::from_env() {
        Ok(store_config) => {
            let store = Store::connect(store_config).await?;
            Ok(Arc::new(store))
        }
        Err(e) => {
            tracing::warn!("{}; note operations will fail until a database is configured", e);
            Ok(Arc::new(UnavailableStore::new(e.to_string())))
        }
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
