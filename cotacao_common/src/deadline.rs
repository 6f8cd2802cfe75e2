//! Per-call deadlines.
//!
//! Every suspension point of the pipeline (upstream fetch, store write, client
//! request, shutdown drain) goes through [`bounded`]. The limit is absolute for
//! that call: it starts when `bounded` is awaited and is independent of any
//! deadline the caller may have. Expiry drops the inner future.
use std::future::Future;
use std::time::Duration;

use crate::error::{Operation, QuoteError};

/// Runs `fut` with a hard `limit`, flattening its own error into `QuoteError`.
pub async fn bounded<T, E, F>(operation: Operation, limit: Duration, fut: F) -> Result<T, QuoteError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<QuoteError>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => Err(QuoteError::timeout(operation, limit)),
    }
}
