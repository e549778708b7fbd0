use chrono::Utc;
use tracing::{error, info};

use mandi_core::CatalogId;
use mandi_events::NetworkLogEntry;

use super::BroadcastError;
use crate::catalog_store::{CatalogRecord, CatalogStore};
use crate::log_store::LogStore;

/// Broadcast a saved catalog: append an `OUTGOING_CATALOG` entry carrying the
/// catalog snapshot, then flip the status to `BROADCASTED`.
///
/// Publishing an already broadcast catalog is accepted and writes another entry.
/// If the log write fails the status is left untouched.
pub fn publish_catalog(
    catalogs: &dyn CatalogStore,
    logs: &dyn LogStore,
    catalog_id: CatalogId,
) -> Result<CatalogRecord, BroadcastError> {
    let record = catalogs.get(catalog_id)?.ok_or(BroadcastError::NotFound(catalog_id))?;

    logs.append(NetworkLogEntry::outgoing_catalog(catalog_id, record.item.clone(), Utc::now()))
        .map_err(|e| {
            error!(%catalog_id, error = %e, "failed to record outgoing catalog");
            BroadcastError::from(e)
        })?;

    let record = catalogs.mark_broadcasted(catalog_id)?;
    info!(%catalog_id, name = record.item.name(), "catalog broadcast");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandi_catalog::{fallback_catalog, CatalogStatus};
    use mandi_events::{LogEntryType, LogPayload};

    use crate::catalog_store::InMemoryCatalogStore;
    use crate::log_store::{InMemoryLogStore, LogStoreError};

    struct BrokenLog;

    impl LogStore for BrokenLog {
        fn append(&self, _entry: NetworkLogEntry) -> Result<(), LogStoreError> {
            Err(LogStoreError::Storage("disk full".to_string()))
        }

        fn list(&self) -> Result<Vec<NetworkLogEntry>, LogStoreError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn publish_flips_status_and_records_snapshot() {
        let catalogs = InMemoryCatalogStore::new();
        let logs = InMemoryLogStore::new();
        let id = catalogs.save_draft(fallback_catalog()).unwrap();

        let record = publish_catalog(&catalogs, &logs, id).unwrap();

        assert_eq!(record.status, CatalogStatus::Broadcasted);
        let entries = logs.list().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_type(), LogEntryType::OutgoingCatalog);
        match entries[0].payload() {
            LogPayload::OutgoingCatalog(p) => assert_eq!(p.catalog, fallback_catalog()),
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn republishing_writes_another_entry() {
        let catalogs = InMemoryCatalogStore::new();
        let logs = InMemoryLogStore::new();
        let id = catalogs.save_draft(fallback_catalog()).unwrap();

        publish_catalog(&catalogs, &logs, id).unwrap();
        publish_catalog(&catalogs, &logs, id).unwrap();

        assert_eq!(logs.list_for_catalog(id).unwrap().len(), 2);
    }

    #[test]
    fn unknown_catalog_is_not_found() {
        let logs = InMemoryLogStore::new();
        let missing = CatalogId::new();

        let err = publish_catalog(&InMemoryCatalogStore::new(), &logs, missing).unwrap_err();

        assert_eq!(err, BroadcastError::NotFound(missing));
        assert!(logs.list().unwrap().is_empty());
    }

    #[test]
    fn log_failure_keeps_draft_status() {
        let catalogs = InMemoryCatalogStore::new();
        let id = catalogs.save_draft(fallback_catalog()).unwrap();

        let err = publish_catalog(&catalogs, &BrokenLog, id).unwrap_err();

        assert!(matches!(err, BroadcastError::Persistence(_)));
        assert_eq!(catalogs.get(id).unwrap().unwrap().status, CatalogStatus::Draft);
    }
}
