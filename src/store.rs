use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::time::{Instant, timeout_at};

use crate::error::{Error, Result};
use crate::quotation::Quotation;

/// Append-only quotation log backed by SQLite.
#[derive(Debug, Clone)]
pub struct QuotationStore {
    pub(crate) pool: SqlitePool,
}

impl QuotationStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Ok(Self::new(pool))
    }

    pub async fn prepare(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS quotations (
                code TEXT,
                codein TEXT,
                name TEXT,
                high REAL,
                low REAL,
                varBid REAL,
                pctChange TEXT,
                bid REAL,
                ask TEXT,
                timestamp TEXT,
                create_date TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// The row is committed only if `budget` has not run out once the insert
    /// is done; on `Error::Timeout` the transaction is rolled back.
    pub async fn insert(&self, q: &Quotation, budget: Duration) -> Result<()> {
        let deadline = Instant::now() + budget;

        let tx = timeout_at(deadline, async {
            let mut tx = self.pool.begin().await?;
            sqlx::query(
                r#"
                INSERT INTO quotations
                (code, codein, name, high, low, varBid, pctChange, bid, ask, timestamp, create_date)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&q.code)
            .bind(&q.codein)
            .bind(&q.name)
            .bind(q.high)
            .bind(q.low)
            .bind(q.var_bid)
            .bind(&q.pct_change)
            .bind(q.bid)
            .bind(&q.ask)
            .bind(&q.timestamp)
            .bind(&q.create_date)
            .execute(&mut *tx)
            .await?;
            Ok::<_, Error>(tx)
        })
        .await
        .map_err(|_| Error::Timeout(budget))??;

        if Instant::now() >= deadline {
            return Err(Error::Timeout(budget));
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
