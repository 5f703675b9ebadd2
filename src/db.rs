use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::locale::Locale;

/// A stored translation. Rows are written by migrations or admin tooling and
/// are only ever read here.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Translation {
    pub id: i64,
    pub language_key: String,
    pub locale: Locale,
    pub translation: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("translation not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read access to stored translations.
///
/// Implementations must be safe to share between concurrent requests; each
/// call is a single self-contained read.
#[async_trait]
pub trait TranslationStore: Send + Sync {
    /// Fetch the translation for the exact `(key, locale)` pair.
    ///
    /// Returns `StoreError::NotFound` when no row matches. The unique index on
    /// `(language_key, locale)` guarantees at most one row.
    async fn find_by_key(&self, key: &str, locale: Locale) -> Result<Translation, StoreError>;

    /// Fetch every translation stored for `locale`. No ordering is applied.
    async fn find_all(&self, locale: Locale) -> Result<Vec<Translation>, StoreError>;

    /// Check that the backing storage is reachable. In-memory stores always are.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

const FIND_BY_KEY: &str = "SELECT id, language_key, locale, translation, created_at, updated_at
     FROM translation
     WHERE language_key = $1 AND locale = $2";

const FIND_ALL: &str = "SELECT id, language_key, locale, translation, created_at, updated_at
     FROM translation
     WHERE locale = $1";

const PING: &str = "SELECT 1";

#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open a connection pool. Connections are established lazily by sqlx,
    /// but one is acquired here so a bad URL fails at startup.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await?;

        info!(
            max_connections = config.max_connections,
            "Connected to database"
        );

        Ok(Self { pool })
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl TranslationStore for Database {
    async fn find_by_key(&self, key: &str, locale: Locale) -> Result<Translation, StoreError> {
        debug!(key, %locale, "Querying translation");

        sqlx::query_as::<_, Translation>(FIND_BY_KEY)
            .bind(key)
            .bind(locale)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn find_all(&self, locale: Locale) -> Result<Vec<Translation>, StoreError> {
        debug!(%locale, "Querying translations");

        let translations = sqlx::query_as::<_, Translation>(FIND_ALL)
            .bind(locale)
            .fetch_all(&self.pool)
            .await?;

        Ok(translations)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query(PING).execute(&self.pool).await?;
        Ok(())
    }
}
