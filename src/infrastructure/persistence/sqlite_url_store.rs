//! SQLite implementation of the URL store.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlStore;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    code: String,
    url: String,
    short_url: String,
    domain: String,
    counter: i64,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::new(
            row.id,
            row.code,
            row.url,
            row.short_url,
            row.domain,
            row.counter,
        )
    }
}

/// SQLite store for URL records.
///
/// The `UNIQUE` constraint on `urls.code` is the authoritative guard against
/// two records sharing a code; violations surface as
/// [`AppError::DuplicateCode`].
pub struct SqliteUrlStore {
    pool: Arc<SqlitePool>,
}

impl SqliteUrlStore {
    /// Creates a new store over an existing connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `database_url`.
    ///
    /// In-memory databases are limited to a single connection, since every
    /// SQLite connection to `:memory:` would otherwise see its own database.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);

        if database_url.contains(":memory:") {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;

        Ok(Self::new(Arc::new(pool)))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(self.pool.as_ref()).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UrlStore for SqliteUrlStore {
    async fn add(&self, record: &NewUrlRecord) -> Result<i64, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO urls (code, url, short_url, domain, counter)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.code)
        .bind(&record.original_url)
        .bind(&record.short_url)
        .bind(&record.domain)
        .bind(record.counter)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM urls WHERE id = ?")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn find_url_by_code(&self, code: &str) -> Result<Option<String>, AppError> {
        let url = sqlx::query_scalar::<_, String>("SELECT url FROM urls WHERE code = ?")
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(url)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, code, url, short_url, domain, counter
            FROM urls
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, code, url, short_url, domain, counter
            FROM urls
            WHERE url = ?
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn increment_counter(&self, code: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE urls SET counter = counter + 1 WHERE code = ?")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
