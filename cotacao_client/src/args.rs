//! Command-line arguments for the quote client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use cotacao_common::net::{DEFAULT_SERVER_URL, REQUEST_TIMEOUT};
use cotacao_common::{QuoteError, Result};

use crate::ClientConfig;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Fetches the current quote from the local server and writes it to a file", long_about = None)]
pub struct Args {
    /// Quote endpoint of the server.
    #[clap(long, env = "COTACAO_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub url: String,

    /// File that receives the formatted quote. Overwritten on success.
    #[clap(long, env = "COTACAO_OUTPUT", default_value = "cotacao.txt")]
    pub output: PathBuf,

    /// Deadline for the whole request, in milliseconds.
    #[clap(long, env = "COTACAO_TIMEOUT_MS", default_value_t = REQUEST_TIMEOUT.as_millis() as u64)]
    pub timeout_ms: u64,
}

impl TryFrom<Args> for ClientConfig {
    type Error = QuoteError;

    fn try_from(args: Args) -> Result<Self> {
        if args.timeout_ms == 0 {
            return Err(QuoteError::Config("--timeout-ms must be greater than zero".to_string()));
        }
        Ok(ClientConfig {
            url: args.url.trim().to_string(),
            output: normalize_path(&args.output),
            timeout: Duration::from_millis(args.timeout_ms),
        })
    }
}

/// Trims whitespace and a matching pair of quotes around a CLI path.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &Path) -> PathBuf {
    let raw = raw.to_string_lossy();
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}
