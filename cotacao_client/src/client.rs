//! Timed call to the quote server.
use std::time::Duration;

use cotacao_common::deadline::bounded;
use cotacao_common::{Operation, Quote, QuoteError, Result};
use log::{debug, warn};

/// HTTP client for the server's `/cotacao` endpoint.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl QuoteClient {
    /// Creates a client for `url`; every call is bounded by `timeout`.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| QuoteError::Setup(format!("failed to build HTTP client: {}", e)))?;
        Ok(QuoteClient {
            http,
            url: url.to_string(),
            timeout,
        })
    }

    /// Fetches the current quote.
    ///
    /// The status code is not checked: the body is decoded as a `Quote`
    /// whatever it is, so a server-side 500 surfaces as a decode error.
    pub async fn fetch(&self) -> Result<Quote> {
        let body = bounded(Operation::Request, self.timeout, self.request_body()).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn request_body(&self) -> Result<Vec<u8>> {
        let res = self.http.get(&self.url).send().await?;
        let status = res.status();
        if !status.is_success() {
            warn!("Server answered {}", status);
        }
        let body = res.bytes().await?;
        debug!("Received {} bytes from {}", body.len(), self.url);
        Ok(body.to_vec())
    }
}
