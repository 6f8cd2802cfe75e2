//! Command-line arguments and runtime configuration for the quote server.
//!
//! Every value has the production default, and each flag can also come from
//! the environment. `Args` is converted into a plain [`ServerConfig`] which is
//! what the rest of the crate consumes.
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use cotacao_common::net::{
    DEFAULT_BIND_ADDRESS, DEFAULT_UPSTREAM_BASE_URL, FETCH_TIMEOUT, SHUTDOWN_GRACE, STORE_TIMEOUT,
};
use cotacao_common::{CurrencyPair, QuoteError, Result};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Serves the latest currency quote on GET /cotacao", long_about = None)]
pub struct Args {
    /// Address the HTTP server binds to.
    #[clap(long, env = "COTACAO_BIND", default_value = DEFAULT_BIND_ADDRESS)]
    pub bind: String,

    /// Base URL of the upstream quote provider.
    #[clap(long, env = "COTACAO_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_BASE_URL)]
    pub upstream_url: String,

    /// Currency pair to quote, as BASE-QUOTE.
    #[clap(long, env = "COTACAO_PAIR", default_value = "USD-BRL")]
    pub pair: String,

    /// SQLite database file, created if missing.
    #[clap(long, env = "COTACAO_DATABASE", default_value = "server.db")]
    pub database: PathBuf,

    /// Deadline for the upstream call, in milliseconds.
    #[clap(long, env = "COTACAO_FETCH_TIMEOUT_MS", default_value_t = FETCH_TIMEOUT.as_millis() as u64)]
    pub fetch_timeout_ms: u64,

    /// Deadline for one store insert, in milliseconds.
    #[clap(long, env = "COTACAO_STORE_TIMEOUT_MS", default_value_t = STORE_TIMEOUT.as_millis() as u64)]
    pub store_timeout_ms: u64,

    /// How long in-flight requests may run after a shutdown signal, in seconds.
    #[clap(long, env = "COTACAO_SHUTDOWN_TIMEOUT_SECS", default_value_t = SHUTDOWN_GRACE.as_secs())]
    pub shutdown_timeout_secs: u64,
}

/// Validated server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub bind: SocketAddr,
    /// Upstream base URL, without the `/json/last/...` path.
    pub upstream_url: String,
    /// Pair requested from upstream.
    pub pair: CurrencyPair,
    /// Database file.
    pub database: PathBuf,
    /// Upstream deadline.
    pub fetch_timeout: Duration,
    /// Store insert deadline.
    pub store_timeout: Duration,
    /// Shutdown drain deadline.
    pub shutdown_timeout: Duration,
}

impl TryFrom<Args> for ServerConfig {
    type Error = QuoteError;

    fn try_from(args: Args) -> Result<Self> {
        let bind = args
            .bind
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| QuoteError::Config(format!("invalid bind address '{}': {}", args.bind, e)))?;

        Ok(ServerConfig {
            bind,
            upstream_url: args.upstream_url.trim().to_string(),
            pair: args.pair.parse()?,
            database: args.database,
            fetch_timeout: non_zero("fetch-timeout-ms", args.fetch_timeout_ms, Duration::from_millis)?,
            store_timeout: non_zero("store-timeout-ms", args.store_timeout_ms, Duration::from_millis)?,
            shutdown_timeout: non_zero("shutdown-timeout-secs", args.shutdown_timeout_secs, Duration::from_secs)?,
        })
    }
}

fn non_zero(name: &str, value: u64, unit: fn(u64) -> Duration) -> Result<Duration> {
    if value == 0 {
        return Err(QuoteError::Config(format!("--{} must be greater than zero", name)));
    }
    Ok(unit(value))
}
