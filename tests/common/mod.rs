//! In-memory stores shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use translation_service::{Locale, StoreError, Translation, TranslationStore};

/// Store backed by a map keyed like the unique index: `(language_key, locale)`.
#[derive(Default)]
pub struct MemoryStore {
    rows: HashMap<(String, Locale), Translation>,
}

impl MemoryStore {
    pub fn with(mut self, language_key: &str, locale: Locale, text: &str) -> Self {
        let created_at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let id = self.rows.len() as i64 + 1;
        self.rows.insert(
            (language_key.to_string(), locale),
            Translation {
                id,
                language_key: language_key.to_string(),
                locale,
                translation: text.to_string(),
                created_at,
                updated_at: created_at,
            },
        );
        self
    }
}

#[async_trait]
impl TranslationStore for MemoryStore {
    async fn find_by_key(&self, key: &str, locale: Locale) -> Result<Translation, StoreError> {
        self.rows
            .get(&(key.to_string(), locale))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_all(&self, locale: Locale) -> Result<Vec<Translation>, StoreError> {
        Ok(self
            .rows
            .values()
            .filter(|row| row.locale == locale)
            .cloned()
            .collect())
    }
}

/// Store whose every call fails like a lost connection.
pub struct FailingStore;

#[async_trait]
impl TranslationStore for FailingStore {
    async fn find_by_key(&self, _: &str, _: Locale) -> Result<Translation, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_all(&self, _: Locale) -> Result<Vec<Translation>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Store that answers only after `delay`.
pub struct SlowStore {
    pub delay: Duration,
}

#[async_trait]
impl TranslationStore for SlowStore {
    async fn find_by_key(&self, _: &str, _: Locale) -> Result<Translation, StoreError> {
        tokio::time::sleep(self.delay).await;
        Err(StoreError::NotFound)
    }

    async fn find_all(&self, _: Locale) -> Result<Vec<Translation>, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }
}

/// The seed data used across tests: two `en_GB` rows and one `de_DE` row.
pub fn seeded_store() -> Arc<dyn TranslationStore> {
    Arc::new(
        MemoryStore::default()
            .with("test_lk_0", Locale::EnGb, "Translation Service")
            .with("test_lk_0", Locale::DeDe, "Übersetzungsdienst")
            .with("test_lk_1", Locale::EnGb, "Welcome"),
    )
}

pub fn empty_store() -> Arc<dyn TranslationStore> {
    Arc::new(MemoryStore::default())
}

pub fn failing_store() -> Arc<dyn TranslationStore> {
    Arc::new(FailingStore)
}

pub fn slow_store(delay: Duration) -> Arc<dyn TranslationStore> {
    Arc::new(SlowStore { delay })
}
