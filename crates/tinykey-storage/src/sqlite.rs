use crate::error::{is_unique_violation, map_sqlx_error, parse_created_at};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tinykey_core::store::Result;
use tinykey_core::{ShortKey, StoreError, UrlRecord, UrlStore};
use tracing::debug;

const SCHEMA: &str = include_str!("../ddl/sqlite/urls.sql");

/// SQLite implementation of the store contract.
///
/// Uniqueness is enforced by the `UNIQUE` constraint on `short_key`; a
/// rejected insert comes back as [`StoreError::DuplicateKey`].
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a store from an existing SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `database_url`, creating the database file if needed.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Opens a private in-memory database.
    ///
    /// An in-memory SQLite database lives and dies with its connection, so
    /// the pool is pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UrlStore for SqliteStore {
    async fn initialize(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("sqlite schema ready");
        Ok(())
    }

    async fn save(&self, key: &ShortKey, long_url: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO urls (short_key, long_url)
            VALUES (?, ?)
            "#,
        )
        .bind(key.as_str())
        .bind(long_url)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StoreError::DuplicateKey(key.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn find(&self, key: &ShortKey) -> Result<Option<String>> {
        let row = sqlx::query(
            r#"
            SELECT long_url
            FROM urls
            WHERE short_key = ?
            LIMIT 1
            "#,
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(|row| row.try_get::<String, _>("long_url").map_err(map_sqlx_error))
            .transpose()
    }

    async fn find_record(&self, key: &ShortKey) -> Result<Option<UrlRecord>> {
        let row = sqlx::query(
            r#"
            SELECT long_url, created_at
            FROM urls
            WHERE short_key = ?
            LIMIT 1
            "#,
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let long_url: String = row.try_get("long_url").map_err(map_sqlx_error)?;
        let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

        Ok(Some(UrlRecord {
            short_key: key.clone(),
            long_url,
            created_at: parse_created_at(created_at)?,
        }))
    }

    async fn exists(&self, key: &ShortKey) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM urls
            WHERE short_key = ?
            LIMIT 1
            "#,
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }
}
