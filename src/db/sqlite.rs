use crate::db::schema::{SQLITE_INIT, TABLES};
use crate::error::TripError;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, Transaction};
use std::str::FromStr;
use tracing::{debug, info};

pub type SqlitePool = Pool<Sqlite>;

/// A pooled connection scoped to one operation; returned to the pool on drop.
pub type Session = PoolConnection<Sqlite>;

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` with foreign keys enforced.
    pub async fn connect(database_url: &str) -> Result<Self, TripError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        debug!(database_url, "sqlite pool connected");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn session(&self) -> Result<Session, TripError> {
        Ok(self.pool.acquire().await?)
    }

    /// Rolled back on drop unless committed.
    pub async fn transaction(&self) -> Result<Transaction<'static, Sqlite>, TripError> {
        Ok(self.pool.begin().await?)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), TripError> {
        // sqlx::query runs one statement at a time
        let mut tx = self.pool.begin().await?;
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        info!(tables = TABLES.len(), "schema initialized");
        Ok(())
    }

    /// Names of the known tables that currently exist.
    pub async fn existing_tables(&self) -> Result<Vec<String>, TripError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(name,)| name)
            .filter(|name| TABLES.contains(&name.as_str()))
            .collect())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
