use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use mandi_catalog::{CatalogItem, CatalogStatus};
use mandi_core::CatalogId;

/// A persisted catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogRecord {
    pub id: CatalogId,
    pub item: CatalogItem,
    pub status: CatalogStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("catalog not found: {0}")]
    NotFound(CatalogId),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Keyed catalog persistence.
///
/// Entries are saved as `Draft`; only the status ever changes afterwards, and
/// nothing is deleted.
pub trait CatalogStore: Send + Sync {
    /// Persist a new entry with status `Draft`.
    fn save_draft(&self, item: CatalogItem) -> Result<CatalogId, StoreError>;

    fn get(&self, id: CatalogId) -> Result<Option<CatalogRecord>, StoreError>;

    /// All entries, oldest first.
    fn list(&self) -> Result<Vec<CatalogRecord>, StoreError>;

    fn set_status(&self, id: CatalogId, status: CatalogStatus) -> Result<CatalogRecord, StoreError>;

    fn mark_broadcasted(&self, id: CatalogId) -> Result<CatalogRecord, StoreError> {
        self.set_status(id, CatalogStatus::Broadcasted)
    }
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn save_draft(&self, item: CatalogItem) -> Result<CatalogId, StoreError> {
        (**self).save_draft(item)
    }

    fn get(&self, id: CatalogId) -> Result<Option<CatalogRecord>, StoreError> {
        (**self).get(id)
    }

    fn list(&self) -> Result<Vec<CatalogRecord>, StoreError> {
        (**self).list()
    }

    fn set_status(&self, id: CatalogId, status: CatalogStatus) -> Result<CatalogRecord, StoreError> {
        (**self).set_status(id, status)
    }
}

#[derive(Debug, Default)]
struct Records {
    by_id: HashMap<CatalogId, CatalogRecord>,
    /// Insertion order.
    order: Vec<CatalogId>,
}

/// In-memory catalog store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<Records>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StoreError {
        StoreError::Storage("lock poisoned".to_string())
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn save_draft(&self, item: CatalogItem) -> Result<CatalogId, StoreError> {
        let id = CatalogId::new();
        let now = Utc::now();
        let record = CatalogRecord {
            id,
            item,
            status: CatalogStatus::Draft,
            created_at: now,
            updated_at: now,
        };

        let mut records = self.inner.write().map_err(|_| Self::poisoned())?;
        records.by_id.insert(id, record);
        records.order.push(id);
        Ok(id)
    }

    fn get(&self, id: CatalogId) -> Result<Option<CatalogRecord>, StoreError> {
        let records = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(records.by_id.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<CatalogRecord>, StoreError> {
        let records = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(records
            .order
            .iter()
            .filter_map(|id| records.by_id.get(id).cloned())
            .collect())
    }

    fn set_status(&self, id: CatalogId, status: CatalogStatus) -> Result<CatalogRecord, StoreError> {
        let mut records = self.inner.write().map_err(|_| Self::poisoned())?;
        let record = records.by_id.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.status = status;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}
