//! Axum server setup
//!
//! Server skeleton with:
//! - Request tracing
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::config::AppConfig;
use crate::flash::FlashSigner;
use crate::records::RecordStore;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:5000)
    pub bind_addr: SocketAddr,

    /// Key for signing flash cookies
    pub secret_key: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ServerConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            bind_addr: config.bind_addr,
            secret_key: config.secret_key.clone(),
        }
    }
}

/// Shared application state, immutable after startup
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub flash: FlashSigner,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, secret_key: &str) -> Self {
        Self {
            store,
            flash: FlashSigner::new(secret_key),
        }
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::form::router())
        .merge(routes::records::router())
        .merge(routes::health::router())
        .merge(routes::assets::router())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(MySqlRecordStore::from_config(&config.db));
/// run_server(store, ServerConfig::from(&config)).await?;
/// ```
pub async fn run_server(store: Arc<dyn RecordStore>, config: ServerConfig) -> Result<(), ServerError> {
    let state = AppState::new(store, &config.secret_key);
    let app = build_router(state);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
