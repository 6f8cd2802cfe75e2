//! Append-only quote persistence.
//!
//! `SqliteQuoteStore` keeps one row per served quote in a file-backed SQLite
//! database. The schema is created on connect (`IF NOT EXISTS`, so it is safe
//! on every startup). Each insert is bounded by its own short deadline; a slow
//! write fails the request instead of being retried.
//!
//! The insert runs in a transaction on a connection checked out before the
//! deadline starts, so pool waits are not charged to the write. Only
//! `BEGIN` + `INSERT` are bounded. If the deadline elapses the transaction is
//! dropped and rolled back; `COMMIT` is issued only after the insert returned
//! in time, so a failed save never leaves a row behind.
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use cotacao_common::deadline::bounded;
use cotacao_common::{Operation, Quote, QuoteError, QuoteRecord, Result};
use log::info;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqlitePool, SqlitePoolOptions,
    SqliteSynchronous,
};
use sqlx::{Connection, Row};

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS quotes (bid REAL NOT NULL, created_at DATETIME DEFAULT CURRENT_TIMESTAMP)";

/// Sink for successfully fetched quotes.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Appends one record for `quote`.
    async fn save(&self, quote: &Quote) -> Result<()>;
}

/// SQLite-backed store.
#[derive(Debug, Clone)]
pub struct SqliteQuoteStore {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqliteQuoteStore {
    /// Opens (creating if missing) the database at `path` and ensures the
    /// `quotes` table exists. Failures here are setup errors.
    pub async fn connect(path: impl AsRef<Path>, timeout: Duration) -> Result<Self> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| QuoteError::Setup(format!("failed to open database {}: {}", path.display(), e)))?;

        sqlx::query(CREATE_TABLE)
            .execute(&pool)
            .await
            .map_err(|e| QuoteError::Setup(format!("failed to create table: {}", e)))?;

        info!("Quote store ready at {}", path.display());
        Ok(SqliteQuoteStore { pool, timeout })
    }

    /// Number of stored records.
    pub async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM quotes")
            .fetch_one(&self.pool)
            .await?;
        let n: i64 = row.try_get("n")?;
        Ok(u64::try_from(n).map_err(|e| sqlx::Error::Decode(e.into()))?)
    }

    /// Up to `limit` records, newest first.
    pub async fn recent(&self, limit: u32) -> Result<Vec<QuoteRecord>> {
        let rows = sqlx::query("SELECT bid, created_at FROM quotes ORDER BY rowid DESC LIMIT ?")
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| -> Result<QuoteRecord> {
                Ok(QuoteRecord {
                    bid: row.try_get("bid")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl QuoteStore for SqliteQuoteStore {
    async fn save(&self, quote: &Quote) -> Result<()> {
        let mut pooled = self.pool.acquire().await?;
        let conn: &mut SqliteConnection = &mut pooled;

        let tx = bounded(Operation::Store, self.timeout, async move {
            let mut tx = conn.begin().await?;
            sqlx::query("INSERT INTO quotes (bid) VALUES (?)")
                .bind(quote.bid)
                .execute(&mut *tx)
                .await?;
            Ok::<_, sqlx::Error>(tx)
        })
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cotacao_common::net::STORE_TIMEOUT;
    use tempfile::TempDir;

    const GENEROUS: Duration = Duration::from_secs(5);

    async fn open(dir: &TempDir) -> SqliteQuoteStore {
        SqliteQuoteStore::connect(dir.path().join("quotes.db"), GENEROUS)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn save_appends_a_row_with_the_bid() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir).await;

        store.save(&Quote::new(5.1)).await.unwrap();
        store.save(&Quote::new(5.2)).await.unwrap();
        store.save(&Quote::new(5.3)).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 3);
        let latest = store.recent(1).await.unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].bid, 5.3);
    }

    #[tokio::test]
    async fn created_at_is_assigned_by_the_database() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir).await;
        let before = chrono::Utc::now().naive_utc() - chrono::Duration::seconds(5);

        store.save(&Quote::new(4.99)).await.unwrap();

        let rows = store.recent(10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].created_at >= before);
    }

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir).await;
        store.save(&Quote::new(1.0)).await.unwrap();
        store.close().await;

        let reopened = open(&dir).await;
        reopened.save(&Quote::new(2.0)).await.unwrap();
        assert_eq!(reopened.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn unreachable_database_is_a_setup_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("quotes.db");
        let err = SqliteQuoteStore::connect(path, GENEROUS).await.unwrap_err();
        assert!(matches!(err, QuoteError::Setup(_)));
    }

    #[tokio::test]
    async fn concurrent_saves_at_the_store_deadline_match_the_row_count() {
        let dir = TempDir::new().unwrap();
        let store = SqliteQuoteStore::connect(dir.path().join("quotes.db"), STORE_TIMEOUT)
            .await
            .unwrap();

        let saves = (0..8).map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.save(&Quote::new(5.0 + f64::from(i))).await })
        });
        let mut saved = 0;
        for save in saves.collect::<Vec<_>>() {
            match save.await.unwrap() {
                Ok(()) => saved += 1,
                Err(e) => assert!(e.is_timeout(), "unexpected store error: {}", e),
            }
        }

        assert!(saved > 0);
        assert_eq!(store.count().await.unwrap(), saved);
    }

    #[tokio::test]
    async fn insert_blocked_past_the_deadline_is_rolled_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quotes.db");
        let store = SqliteQuoteStore::connect(&path, STORE_TIMEOUT).await.unwrap();

        let mut writer = SqliteConnection::connect_with(&SqliteConnectOptions::new().filename(&path))
            .await
            .unwrap();
        sqlx::query("BEGIN IMMEDIATE").execute(&mut writer).await.unwrap();

        let err = store.save(&Quote::new(5.0)).await.unwrap_err();
        assert!(matches!(
            err,
            QuoteError::Timeout { operation: Operation::Store, .. }
        ));

        sqlx::query("ROLLBACK").execute(&mut writer).await.unwrap();
        writer.close().await.unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(store.count().await.unwrap(), 0);
    }
}
