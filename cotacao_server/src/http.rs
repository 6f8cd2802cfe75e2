//! HTTP surface of the quote server.
//!
//! One route, `GET /cotacao`: fetch upstream, persist, answer with
//! `{"bid": ...}`. A failure at either step ends the request with a 500 whose
//! body is the error message. A quote that was fetched but could not be stored
//! is dropped and never reaches the client.
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use cotacao_common::net::QUOTE_ROUTE;
use cotacao_common::{Quote, QuoteError};
use log::{error, info};

use crate::fetcher::QuoteSource;
use crate::store::QuoteStore;

/// Collaborators shared by every request.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn QuoteSource>,
    store: Arc<dyn QuoteStore>,
}

impl AppState {
    /// Bundles a quote source and a store.
    pub fn new(source: Arc<dyn QuoteSource>, store: Arc<dyn QuoteStore>) -> Self {
        AppState { source, store }
    }
}

/// Builds the router serving `GET /cotacao`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(QUOTE_ROUTE, get(get_quote))
        .with_state(state)
}

/// Handler-boundary error: logged once, rendered as a plain-text 500.
#[derive(Debug)]
pub struct AppError(QuoteError);

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

async fn get_quote(State(state): State<AppState>) -> Result<Json<Quote>, AppError> {
    let quote = state.source.fetch().await.map_err(|e| {
        error!("Failed to get quote ({:?}): {}", e.kind(), e);
        e
    })?;

    state.store.save(&quote).await.map_err(|e| {
        error!("Failed to save quote {} ({:?}): {}", quote.bid, e.kind(), e);
        e
    })?;

    info!("Served quote bid={}", quote.bid);
    Ok(Json(quote))
}
