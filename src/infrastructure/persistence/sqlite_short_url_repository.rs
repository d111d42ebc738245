//! SQLite implementation of the short URL repository.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewShortUrl, ShortUrl, WarningType};
use crate::domain::repositories::{ShortUrlRepository, StoreSummary};
use crate::error::AppError;

const CREATE_URLS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS urls (
        short_code TEXT PRIMARY KEY,
        original_url TEXT NOT NULL,
        warning_type TEXT,
        custom_warning TEXT,
        created_at INTEGER NOT NULL,
        access_count INTEGER DEFAULT 0
    )
"#;

/// Pool settings for [`SqliteShortUrlRepository::connect`].
#[derive(Debug, Clone)]
pub struct SqliteSettings {
    pub max_connections: u32,
    pub busy_timeout: Duration,
}

impl Default for SqliteSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, FromRow)]
struct ShortUrlRow {
    short_code: String,
    original_url: String,
    warning_type: Option<String>,
    custom_warning: Option<String>,
    created_at: i64,
    access_count: Option<i64>,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        let warning_type = row
            .warning_type
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .map(WarningType::from_stored);

        if let Some(unknown) = warning_type.as_ref().filter(|w| !w.is_recognized()) {
            tracing::warn!(
                code = %row.short_code,
                warning_type = %unknown,
                "Unrecognized stored warning type"
            );
        }

        ShortUrl {
            short_code: row.short_code,
            original_url: row.original_url,
            warning_type,
            custom_warning: row.custom_warning,
            created_at: row.created_at,
            access_count: row.access_count.unwrap_or(0),
        }
    }
}

/// SQLite repository backing the `urls` table.
///
/// Uses prepared statements for every query.
#[derive(Clone)]
pub struct SqliteShortUrlRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteShortUrlRepository {
    /// Wraps an existing pool. Call [`Self::init_schema`] before use.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Opens the database at `database_url` and ensures the schema exists.
    ///
    /// The file is created if missing.
    pub async fn connect(database_url: &str, settings: &SqliteSettings) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(settings.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(options)
            .await?;

        let repository = Self::new(Arc::new(pool));
        repository.init_schema().await?;

        Ok(repository)
    }

    /// Creates the `urls` table if it does not exist. Idempotent.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(CREATE_URLS_TABLE)
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }

    /// Underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ShortUrlRepository for SqliteShortUrlRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT short_code, original_url, warning_type, custom_warning, created_at, access_count
            FROM urls
            WHERE short_code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        sqlx::query(
            r#"
            INSERT INTO urls (
                short_code, original_url, warning_type, custom_warning, created_at, access_count
            )
            VALUES (?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(&new_url.short_code)
        .bind(&new_url.original_url)
        .bind(new_url.warning_type.as_ref().map(WarningType::as_str))
        .bind(&new_url.custom_warning)
        .bind(new_url.created_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(new_url.into_short_url())
    }

    async fn increment_access_count(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE urls SET access_count = COALESCE(access_count, 0) + 1 WHERE short_code = ?",
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }

    async fn summary(&self) -> Result<StoreSummary, AppError> {
        let (total_urls, total_accesses): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(access_count), 0) FROM urls",
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(StoreSummary {
            total_urls,
            total_accesses,
        })
    }
}
