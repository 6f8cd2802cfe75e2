//! Shared networking constants, default limits and the upstream URL helper
//! used by client and server.
use std::time::Duration;

use crate::pair::CurrencyPair;

/// Route serving the latest quote.
pub const QUOTE_ROUTE: &str = "/cotacao";
/// Default bind address of the server (all interfaces).
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
/// Endpoint the client calls by default.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/cotacao";
/// Base URL of the upstream quote provider.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://economia.awesomeapi.com.br";

/// Upper bound for the server's upstream call.
pub const FETCH_TIMEOUT: Duration = Duration::from_millis(200);
/// Upper bound for a single store insert.
pub const STORE_TIMEOUT: Duration = Duration::from_millis(10);
/// Upper bound for the client's call to the server.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(300);
/// How long in-flight requests may run once shutdown starts.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Builds the upstream "last quote" URL for `pair`.
pub fn upstream_url(base_url: &str, pair: &CurrencyPair) -> String {
    format!("{}/json/last/{}", base_url.trim_end_matches('/'), pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_default_upstream_url() {
        assert_eq!(
            upstream_url(DEFAULT_UPSTREAM_BASE_URL, &CurrencyPair::default()),
            "https://economia.awesomeapi.com.br/json/last/USD-BRL"
        );
    }

    #[test]
    fn tolerates_trailing_slash() {
        assert_eq!(
            upstream_url("http://127.0.0.1:9000/", &CurrencyPair::default()),
            "http://127.0.0.1:9000/json/last/USD-BRL"
        );
    }

    #[test]
    fn default_server_url_points_at_quote_route() {
        assert!(DEFAULT_SERVER_URL.ends_with(QUOTE_ROUTE));
        assert!(DEFAULT_BIND_ADDRESS.ends_with(":8080"));
    }
}
