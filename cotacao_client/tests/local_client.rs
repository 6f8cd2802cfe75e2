use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use cotacao_client::{fetch_and_write, run, ClientConfig, QuoteClient, QuoteSink};
use cotacao_common::{ErrorKind, Quote, Result};
use tempfile::TempDir;
use tokio::net::TcpListener;

const TIMEOUT: Duration = Duration::from_millis(300);

/// Starts a fake quote server answering `/cotacao` with `status` and `body`
/// after `delay`. Returns the endpoint URL.
async fn stub_server(status: StatusCode, body: &'static str, delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route(
        "/cotacao",
        get(move || async move {
            tokio::time::sleep(delay).await;
            (status, body)
        }),
    );
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/cotacao", addr)
}

async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/cotacao", addr)
}

fn config(url: String, dir: &TempDir) -> ClientConfig {
    ClientConfig {
        url,
        output: dir.path().join("cotacao.txt"),
        timeout: TIMEOUT,
    }
}

#[derive(Default)]
struct RecordingSink {
    written: Mutex<Vec<Quote>>,
}

#[async_trait]
impl QuoteSink for RecordingSink {
    async fn write(&self, quote: &Quote) -> Result<()> {
        self.written.lock().unwrap().push(*quote);
        Ok(())
    }
}

#[tokio::test]
async fn writes_formatted_quote_to_file() {
    let dir = TempDir::new().unwrap();
    let url = stub_server(StatusCode::OK, r#"{"bid":5.4321}"#, Duration::ZERO).await;
    let config = config(url, &dir);

    let quote = run(&config).await.unwrap();

    assert_eq!(quote.bid, 5.4321);
    assert_eq!(
        std::fs::read_to_string(&config.output).unwrap(),
        "Dólar: 5.4321"
    );
}

#[tokio::test]
async fn unreachable_server_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let config = config(unreachable_url().await, &dir);

    let err = run(&config).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!config.output.exists());
}

#[tokio::test]
async fn failure_leaves_previous_output_untouched() {
    let dir = TempDir::new().unwrap();
    let config = config(unreachable_url().await, &dir);
    std::fs::write(&config.output, "Dólar: 4.0000").unwrap();

    assert!(run(&config).await.is_err());

    assert_eq!(
        std::fs::read_to_string(&config.output).unwrap(),
        "Dólar: 4.0000"
    );
}

#[tokio::test]
async fn slow_server_hits_the_client_deadline() {
    let dir = TempDir::new().unwrap();
    let url = stub_server(StatusCode::OK, r#"{"bid":5.0}"#, Duration::from_secs(2)).await;
    let config = config(url, &dir);

    let started = Instant::now();
    let err = run(&config).await.unwrap_err();

    assert!(err.is_timeout());
    assert!(started.elapsed() < Duration::from_millis(900));
    assert!(!config.output.exists());
}

#[tokio::test]
async fn server_error_body_fails_to_decode() {
    let dir = TempDir::new().unwrap();
    let url = stub_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        "upstream fetch timed out after 200ms",
        Duration::ZERO,
    )
    .await;
    let config = config(url, &dir);

    let err = run(&config).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(!config.output.exists());
}

#[tokio::test]
async fn sink_receives_the_decoded_quote() {
    let url = stub_server(StatusCode::OK, r#"{"bid":5.1234}"#, Duration::ZERO).await;
    let client = QuoteClient::new(&url, TIMEOUT).unwrap();
    let sink = RecordingSink::default();

    fetch_and_write(&client, &sink).await.unwrap();

    assert_eq!(*sink.written.lock().unwrap(), vec![Quote::new(5.1234)]);
}
