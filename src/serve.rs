//! Server start-up and execution.
//!
//! Wires the validated configuration into the relay service and gateway,
//! then serves HTTP until a shutdown signal arrives.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;

use chat_relay::config::ValidatedConfig;
use chat_relay::gateway::{GatewayState, UploadPolicy, router};
use chat_relay::relay::RelayService;
use chat_relay::webhook::{JsonWebhook, ReqwestClient};

#[cfg(test)]
#[path = "serve_tests.rs"]
mod tests;

/// Error type for server start-up and runtime failures.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Failed to create the upload directory.
    #[error("Failed to create upload directory '{}': {source}", path.display())]
    UploadDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to bind the listening socket.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address that could not be bound
        addr: SocketAddr,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),
}

/// Runs the HTTP server until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the upload directory cannot be created, the socket
/// cannot be bound, or the server fails while running.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires
/// a bound socket and signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), ServeError> {
    prepare_upload_dir(&config).await?;

    let addr = config.socket_addr();
    let app = build_router(config);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServeError::Server)?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Creates the upload directory if it does not exist yet.
async fn prepare_upload_dir(config: &ValidatedConfig) -> Result<(), ServeError> {
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .map_err(|source| ServeError::UploadDir {
            path: config.upload_dir.clone(),
            source,
        })
}

/// Builds the gateway router backed by a real HTTP client.
fn build_router(config: ValidatedConfig) -> Router {
    let webhook = JsonWebhook::new(ReqwestClient::new()).with_timeout(config.timeout);
    let relay = RelayService::new(webhook, config.endpoints);
    let state = GatewayState::new(relay, UploadPolicy::new(config.max_file_size))
        .with_index_file(config.index_file);

    router(state)
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("Shutdown signal received, stopping...");
}
