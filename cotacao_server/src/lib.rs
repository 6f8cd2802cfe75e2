//! Quote server library.
//!
//! Wires the pieces behind `GET /cotacao`:
//! - `fetcher` — bounded upstream call and bid parsing (`QuoteSource`).
//! - `store` — append-only SQLite persistence (`QuoteStore`).
//! - `http` — router, shared state and the handler-boundary error.
//! - `shutdown` — accept loop task, signal handling and bounded drain.
//! - `config` — CLI/env arguments and validated `ServerConfig`.
#![warn(missing_docs)]
pub mod config;
pub mod fetcher;
pub mod http;
pub mod shutdown;
pub mod store;

pub use config::{Args, ServerConfig};
pub use fetcher::{QuoteSource, UpstreamFetcher};
pub use http::{router, AppState};
pub use store::{QuoteStore, SqliteQuoteStore};
