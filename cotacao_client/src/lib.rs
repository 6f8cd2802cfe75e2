//! Quote client library.
//!
//! One-shot flow: call the server's `/cotacao` endpoint with a client-side
//! deadline, decode the `Quote`, write it to a sink. Any failure ends the run
//! before the sink is touched.
//!
//! - `args` — CLI/env arguments converted into [`ClientConfig`].
//! - `client` — the timed HTTP call.
//! - `sink` — output destinations and the line format.
#![warn(missing_docs)]
pub mod args;
pub mod client;
pub mod sink;

use std::path::PathBuf;
use std::time::Duration;

use cotacao_common::{Quote, Result};
use log::info;

pub use args::Args;
pub use client::QuoteClient;
pub use sink::{FileSink, QuoteSink};

/// Validated client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Quote endpoint.
    pub url: String,
    /// Output file.
    pub output: PathBuf,
    /// Request deadline.
    pub timeout: Duration,
}

/// Fetches one quote from `client` and hands it to `sink`.
pub async fn fetch_and_write(client: &QuoteClient, sink: &dyn QuoteSink) -> Result<Quote> {
    info!("Fetching quote...");
    let quote = client.fetch().await?;
    info!("Saving quote {}...", quote.bid);
    sink.write(&quote).await?;
    Ok(quote)
}

/// Runs the client end to end with the production file sink.
pub async fn run(config: &ClientConfig) -> Result<Quote> {
    let client = QuoteClient::new(&config.url, config.timeout)?;
    let sink = FileSink::new(&config.output);
    let quote = fetch_and_write(&client, &sink).await?;
    info!("Quote written to {}", sink.path().display());
    Ok(quote)
}
