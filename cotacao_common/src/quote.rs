//! Quote payloads exchanged between server and client.
//!
//! `Quote` is what the server returns on `GET /cotacao` and what the client
//! decodes. `QuoteRecord` is the persisted form, stamped by the store.
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Latest bid for a currency pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Quoted purchase price.
    pub bid: f64,
}

impl Quote {
    /// Creates a quote for `bid`.
    pub fn new(bid: f64) -> Self {
        Quote { bid }
    }
}

/// A stored quote row.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRecord {
    /// Bid as written.
    pub bid: f64,
    /// Insertion time assigned by the database (UTC).
    pub created_at: NaiveDateTime,
}
