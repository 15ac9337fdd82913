//! In-process URL store.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::repositories::UrlStore;
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    next_id: i64,
    rows: BTreeMap<i64, UrlRecord>,
    by_code: HashMap<String, i64>,
}

/// Map-backed store with the same uniqueness rules as the SQLite schema.
///
/// Identifiers start at 1 and are never reused. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryUrlStore {
    tables: RwLock<Tables>,
}

impl MemoryUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.tables.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tables.read().await.rows.is_empty()
    }
}

#[async_trait]
impl UrlStore for MemoryUrlStore {
    async fn add(&self, record: &NewUrlRecord) -> Result<i64, AppError> {
        let mut tables = self.tables.write().await;

        if tables.by_code.contains_key(&record.code) {
            return Err(AppError::duplicate_code(&record.code));
        }

        tables.next_id += 1;
        let id = tables.next_id;

        tables.by_code.insert(record.code.clone(), id);
        tables.rows.insert(id, record.clone().into_record(id));

        Ok(id)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;

        if let Some(removed) = tables.rows.remove(&id) {
            tables.by_code.remove(&removed.code);
        }

        Ok(())
    }

    async fn find_url_by_code(&self, code: &str) -> Result<Option<String>, AppError> {
        let tables = self.tables.read().await;

        Ok(tables
            .by_code
            .get(code)
            .and_then(|id| tables.rows.get(id))
            .map(|r| r.original_url.clone()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.tables.read().await.rows.get(&id).cloned())
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>, AppError> {
        let tables = self.tables.read().await;

        Ok(tables
            .rows
            .values()
            .find(|r| r.original_url == url)
            .cloned())
    }

    async fn increment_counter(&self, code: &str) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;

        if let Some(id) = tables.by_code.get(code).copied()
            && let Some(row) = tables.rows.get_mut(&id)
        {
            row.counter += 1;
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
