//! Quote Client — fetches the current bid from the local quote server and
//! writes it to a text file. It is a one-shot process: any failure (timeout,
//! refused connection, undecodable body, write error) is logged and the
//! process exits with status 1 without touching the output file.
//!
//! Usage example (CLI):
//! ```bash
//! cotacao_client --url http://localhost:8080/cotacao --output ./cotacao.txt
//! ```
use clap::Parser;
use cotacao_client::{run, Args, ClientConfig};
use cotacao_common::Result;
use log::{error, info};

#[tokio::main]
async fn main() {
    init_logger();
    if let Err(e) = start(Args::parse()).await {
        error!("Failed to get quote: {}", e);
        std::process::exit(1);
    }
}

async fn start(args: Args) -> Result<()> {
    info!("Starting client...");
    let config = ClientConfig::try_from(args)?;
    run(&config).await?;
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
