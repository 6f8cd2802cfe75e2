//! Output sinks for the fetched quote.
//!
//! The production sink overwrites a text file with a single line,
//! `Dólar: <bid with 4 decimals>`, without a trailing newline.
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cotacao_common::{Quote, Result};

/// Destination for a successfully fetched quote.
#[async_trait]
pub trait QuoteSink: Send + Sync {
    /// Writes `quote`, replacing anything written before.
    async fn write(&self, quote: &Quote) -> Result<()>;
}

/// Renders the line written by every sink.
pub fn format_line(quote: &Quote) -> String {
    format!("Dólar: {:.4}", quote.bid)
}

/// Truncates and rewrites a file on every write.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSink { path: path.into() }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuoteSink for FileSink {
    async fn write(&self, quote: &Quote) -> Result<()> {
        tokio::fs::write(&self.path, format_line(quote)).await?;
        Ok(())
    }
}
