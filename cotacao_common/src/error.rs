//! Error types shared between client and server.
//!
//! The `QuoteError` enum unifies every failure of the fetch → store → serve →
//! write chain. Each variant belongs to one [`ErrorKind`], which keeps network,
//! parsing and persistence failures separable in logs even though the HTTP
//! layer maps all of them to the same 500 response.
use std::io;
use std::time::Duration;

use thiserror::Error;

/// Coarse classification of a [`QuoteError`], used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure or deadline expiry while talking to a remote peer.
    Transport,
    /// Unexpected or malformed payload.
    Parse,
    /// Store write, read or schema failure.
    Persistence,
    /// Local file I/O.
    Io,
    /// Startup failure (configuration, bind, database open).
    Setup,
}

/// The operation a deadline was attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Upstream quote API call made by the server.
    Fetch,
    /// Insert into the quote store.
    Store,
    /// Client call to the server endpoint.
    Request,
    /// Draining in-flight requests during shutdown.
    Shutdown,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Fetch => write!(f, "upstream fetch"),
            Operation::Store => write!(f, "store write"),
            Operation::Request => write!(f, "quote request"),
            Operation::Shutdown => write!(f, "graceful shutdown"),
        }
    }
}

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// HTTP transport error (connect, TLS, body read, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A bounded operation did not complete in time.
    #[error("{operation} timed out after {limit:?}")]
    Timeout {
        /// Which call was bounded.
        operation: Operation,
        /// The deadline that elapsed.
        limit: Duration,
    },

    /// Payload had an unexpected shape or a non-numeric value.
    #[error("parse error: {0}")]
    Parse(String),

    /// JSON could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Storage driver error.
    #[error("persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    /// I/O error originating from the standard library or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Fatal startup failure.
    #[error("setup error: {0}")]
    Setup(String),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),
}

impl QuoteError {
    /// Builds a `Timeout` error for `operation`.
    pub fn timeout(operation: Operation, limit: Duration) -> Self {
        QuoteError::Timeout { operation, limit }
    }

    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuoteError::Transport(_) => ErrorKind::Transport,
            QuoteError::Timeout { operation, .. } => match operation {
                Operation::Store => ErrorKind::Persistence,
                Operation::Shutdown => ErrorKind::Setup,
                Operation::Fetch | Operation::Request => ErrorKind::Transport,
            },
            QuoteError::Parse(_) | QuoteError::Json(_) => ErrorKind::Parse,
            QuoteError::Persistence(_) => ErrorKind::Persistence,
            QuoteError::Io(_) => ErrorKind::Io,
            QuoteError::Setup(_) | QuoteError::Config(_) => ErrorKind::Setup,
        }
    }

    /// Returns `true` if a deadline elapsed, either ours or reqwest's own.
    pub fn is_timeout(&self) -> bool {
        match self {
            QuoteError::Timeout { .. } => true,
            QuoteError::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}
