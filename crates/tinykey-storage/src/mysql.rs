use crate::error::{is_unique_violation, map_sqlx_error, parse_created_at};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use tinykey_core::store::Result;
use tinykey_core::{ShortKey, StoreError, UrlRecord, UrlStore};
use tracing::debug;

const SCHEMA: &str = include_str!("../ddl/mysql/urls.sql");

/// MySQL implementation of the store contract.
///
/// `short_key` uses a binary collation so that keys differing only in
/// case are distinct, matching the 62-character alphabet.
#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Creates a store from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl UrlStore for MySqlStore {
    async fn initialize(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("mysql schema ready");
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
