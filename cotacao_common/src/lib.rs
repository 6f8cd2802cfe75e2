//!
//! Common types and utilities shared by the quote server and client.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` used across the workspace.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `quote` — `Quote` payload and the persisted `QuoteRecord`.
//! - `pair` — currency pair identifiers used to address the upstream API.
//! - `net` — route, URLs and default timeouts.
//! - `deadline` — the single helper every bounded call goes through.
#![warn(missing_docs)]
pub mod deadline;
pub mod error;
pub mod net;
pub mod pair;
pub mod quote;
pub mod result;

pub use error::{ErrorKind, Operation, QuoteError};
pub use pair::CurrencyPair;
pub use quote::{Quote, QuoteRecord};
pub use result::Result;
