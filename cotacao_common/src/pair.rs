//! Currency pair identifiers.
//!
//! The upstream API addresses a pair as `USD-BRL` in the URL path and answers
//! with an object keyed by `USDBRL`. `CurrencyPair` holds both codes and
//! renders either form.
use std::fmt;
use std::str::FromStr;

use crate::error::QuoteError;

/// A base/quote pair of ISO 4217 currency codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    base: String,
    quote: String,
}

impl CurrencyPair {
    /// Builds a pair from two three-letter codes (case-insensitive).
    pub fn new(base: &str, quote: &str) -> Result<Self, QuoteError> {
        Ok(CurrencyPair {
            base: normalize_code(base)?,
            quote: normalize_code(quote)?,
        })
    }

    /// US dollar priced in Brazilian real.
    pub fn usd_brl() -> Self {
        CurrencyPair {
            base: String::from("USD"),
            quote: String::from("BRL"),
        }
    }

    /// Base currency code.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Quote currency code.
    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Key of the nested object in the upstream response, e.g. `USDBRL`.
    pub fn response_key(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl Default for CurrencyPair {
    fn default() -> Self {
        CurrencyPair::usd_brl()
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| QuoteError::Config(format!("invalid currency pair '{}', expected BASE-QUOTE", s)))?;
        CurrencyPair::new(base, quote)
    }
}

fn normalize_code(code: &str) -> Result<String, QuoteError> {
    let code = code.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(QuoteError::Config(format!("invalid currency code '{}'", code)))
    }
}
