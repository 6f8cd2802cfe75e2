//! Quote HTTP server.
//!
//! Serves the latest USD-BRL bid on `GET /cotacao`. Each request calls the
//! upstream provider (200 ms), appends the quote to SQLite (10 ms) and returns
//! `{"bid": ...}`. Setup failures (configuration, database, bind) are fatal.
//! SIGINT/SIGTERM stop the accept loop and give in-flight requests up to 10 s.
//!
//! Usage example (CLI):
//! ```bash
//! RUST_LOG=debug cotacao_server --bind 0.0.0.0:8080 --database ./server.db
//! ```
use std::sync::Arc;

use clap::Parser;
use cotacao_common::{QuoteError, Result};
use cotacao_server::shutdown::{drain, shutdown_signal, spawn_server};
use cotacao_server::{router, AppState, Args, ServerConfig, SqliteQuoteStore, UpstreamFetcher};
use log::{error, info};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
    init_logger();
    let args = Args::parse();
    if let Err(e) = run(args).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = ServerConfig::try_from(args)?;
    info!("Starting quote server with {:?}", config);

    let store = Arc::new(SqliteQuoteStore::connect(&config.database, config.store_timeout).await?);
    let fetcher = Arc::new(UpstreamFetcher::new(
        &config.upstream_url,
        config.pair.clone(),
        config.fetch_timeout,
    )?);
    info!("Upstream: {}", fetcher.url());
    let app = router(AppState::new(fetcher, store.clone()));

    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|e| QuoteError::Setup(format!("failed to bind {}: {}", config.bind, e)))?;

    let token = CancellationToken::new();
    let mut server = spawn_server(listener, app, token.clone());

    tokio::select! {
        _ = shutdown_signal() => {}
        finished = &mut server => {
            return match finished {
                Ok(Ok(())) => Err(QuoteError::Setup("server stopped unexpectedly".to_string())),
                Ok(Err(e)) => Err(e),
                Err(e) => Err(QuoteError::Setup(format!("server task failed: {}", e))),
            };
        }
    }

    info!("Shutting down server...");
    token.cancel();
    drain(server, config.shutdown_timeout).await?;
    store.close().await;

    info!("Server stopped");
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
