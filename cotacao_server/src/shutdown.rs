//! Accept loop and graceful shutdown.
//!
//! The accept loop runs on its own task and watches a `CancellationToken`.
//! `main` waits for SIGINT/SIGTERM, cancels the token (no new connections),
//! then gives in-flight requests a bounded amount of time to finish.
use std::time::Duration;

use axum::Router;
use cotacao_common::deadline::bounded;
use cotacao_common::{Operation, QuoteError, Result};
use log::{error, info};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Serves `app` on `listener` until `token` is cancelled and every open
/// connection has finished.
pub async fn serve(listener: TcpListener, app: Router, token: CancellationToken) -> Result<()> {
    info!("HTTP server listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(token.cancelled_owned())
        .await?;
    Ok(())
}

/// Spawns [`serve`] on a separate task.
pub fn spawn_server(
    listener: TcpListener,
    app: Router,
    token: CancellationToken,
) -> JoinHandle<Result<()>> {
    tokio::spawn(serve(listener, app, token))
}

/// Waits for the accept loop to finish, bounded by `grace`.
pub async fn drain(server: JoinHandle<Result<()>>, grace: Duration) -> Result<()> {
    bounded(Operation::Shutdown, grace, async {
        match server.await {
            Ok(result) => result,
            Err(e) => Err(QuoteError::Setup(format!("server task failed: {}", e))),
        }
    })
    .await
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Interrupt received"),
        _ = terminate => info!("Termination signal received"),
    }
}
