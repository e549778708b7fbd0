use std::sync::{Arc, RwLock};

use thiserror::Error;
use tracing::debug;

use mandi_core::CatalogId;
use mandi_events::NetworkLogEntry;

#[derive(Debug, Clone, Error)]
pub enum LogStoreError {
    #[error("log entry already exists: {0}")]
    Duplicate(String),
    #[error("log storage error: {0}")]
    Storage(String),
}

/// Append-only network log.
///
/// Entries are never updated or removed. `list` returns them in append order.
pub trait LogStore: Send + Sync {
    fn append(&self, entry: NetworkLogEntry) -> Result<(), LogStoreError>;

    fn list(&self) -> Result<Vec<NetworkLogEntry>, LogStoreError>;

    fn list_for_catalog(&self, catalog_id: CatalogId) -> Result<Vec<NetworkLogEntry>, LogStoreError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|e| e.catalog_id() == catalog_id)
            .collect())
    }
}

impl<S> LogStore for Arc<S>
where
    S: LogStore + ?Sized,
{
    fn append(&self, entry: NetworkLogEntry) -> Result<(), LogStoreError> {
        (**self).append(entry)
    }

    fn list(&self) -> Result<Vec<NetworkLogEntry>, LogStoreError> {
        (**self).list()
    }

    fn list_for_catalog(&self, catalog_id: CatalogId) -> Result<Vec<NetworkLogEntry>, LogStoreError> {
        (**self).list_for_catalog(catalog_id)
    }
}

/// In-memory append-only log.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryLogStore {
    entries: RwLock<Vec<NetworkLogEntry>>,
}

impl InMemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogStore for InMemoryLogStore {
    fn append(&self, entry: NetworkLogEntry) -> Result<(), LogStoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| LogStoreError::Storage("lock poisoned".to_string()))?;

        if entries.iter().any(|e| e.id() == entry.id()) {
            return Err(LogStoreError::Duplicate(entry.id().to_string()));
        }

        debug!(
            entry_id = %entry.id(),
            entry_type = ?entry.entry_type(),
            catalog_id = %entry.catalog_id(),
            "network log entry appended"
        );
        entries.push(entry);
        Ok(())
    }

    fn list(&self) -> Result<Vec<NetworkLogEntry>, LogStoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| LogStoreError::Storage("lock poisoned".to_string()))?;
        Ok(entries.clone())
    }
}
