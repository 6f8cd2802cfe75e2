//! Upstream quote fetching.
//!
//! `UpstreamFetcher` performs one bounded GET against the quote provider and
//! extracts the bid from a body shaped like
//! `{"USDBRL": {"bid": "5.1234", ...}}`. The whole call (connect, headers and
//! body) shares a single deadline. Transport and parse failures stay distinct
//! variants of `QuoteError` so they can be told apart in logs.
use std::time::Duration;

use async_trait::async_trait;
use cotacao_common::deadline::bounded;
use cotacao_common::net::upstream_url;
use cotacao_common::{CurrencyPair, Operation, Quote, QuoteError, Result};
use log::debug;
use serde_json::Value;

/// Anything that can produce a fresh quote.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetches the current quote.
    async fn fetch(&self) -> Result<Quote>;
}

/// HTTP client for the upstream quote API.
#[derive(Debug, Clone)]
pub struct UpstreamFetcher {
    http: reqwest::Client,
    url: String,
    pair: CurrencyPair,
    timeout: Duration,
}

impl UpstreamFetcher {
    /// Creates a fetcher for `pair` against `base_url`, bounded by `timeout`.
    pub fn new(base_url: &str, pair: CurrencyPair, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| QuoteError::Setup(format!("failed to build HTTP client: {}", e)))?;
        Ok(UpstreamFetcher {
            http,
            url: upstream_url(base_url, &pair),
            pair,
            timeout,
        })
    }

    /// Full URL requested on every fetch.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request_body(&self) -> Result<Vec<u8>> {
        let res = self.http.get(&self.url).send().await?;
        debug!("Upstream {} answered {}", self.url, res.status());
        Ok(res.bytes().await?.to_vec())
    }
}

#[async_trait]
impl QuoteSource for UpstreamFetcher {
    async fn fetch(&self) -> Result<Quote> {
        let body = bounded(Operation::Fetch, self.timeout, self.request_body()).await?;
        let bid = parse_bid(&body, &self.pair.response_key())?;
        Ok(Quote::new(bid))
    }
}

/// Extracts `body[key].bid` as a finite `f64`.
///
/// The upstream encodes the bid as a JSON string; plain numbers are rejected
/// like any other unexpected shape.
pub fn parse_bid(body: &[u8], key: &str) -> Result<f64> {
    let value: Value = serde_json::from_slice(body)?;
    let entry = value
        .get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| QuoteError::Parse(format!("missing object '{}' in upstream response", key)))?;
    let raw = entry
        .get("bid")
        .and_then(Value::as_str)
        .ok_or_else(|| QuoteError::Parse(format!("missing string field '{}.bid'", key)))?;
    let bid = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| QuoteError::Parse(format!("bid '{}' is not a number: {}", raw, e)))?;
    if !bid.is_finite() {
        return Err(QuoteError::Parse(format!("bid '{}' is not a finite number", raw)));
    }
    Ok(bid)
}
