use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mandi_catalog::CatalogItem;
use mandi_core::{BuyerId, CatalogId, LogEntryId};

use crate::bid::BuyerBid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogEntryType {
    OutgoingCatalog,
    IncomingBid,
}

/// Payload of an `OUTGOING_CATALOG` entry: the catalog as it was broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingCatalog {
    pub catalog_id: CatalogId,
    pub catalog: CatalogItem,
}

/// Payload of an `INCOMING_BID` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingBid {
    pub catalog_id: CatalogId,
    pub buyer_id: BuyerId,
    pub buyer_name: String,
    pub bid_amount: f64,
}

/// Typed payload; the variant determines the entry `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogPayload {
    OutgoingCatalog(OutgoingCatalog),
    IncomingBid(IncomingBid),
}

impl LogPayload {
    pub fn entry_type(&self) -> LogEntryType {
        match self {
            LogPayload::OutgoingCatalog(_) => LogEntryType::OutgoingCatalog,
            LogPayload::IncomingBid(_) => LogEntryType::IncomingBid,
        }
    }

    pub fn catalog_id(&self) -> CatalogId {
        match self {
            LogPayload::OutgoingCatalog(p) => p.catalog_id,
            LogPayload::IncomingBid(p) => p.catalog_id,
        }
    }
}

/// Append-only record of a network event.
///
/// Wire shape: `{ "id", "type", "payload", "timestamp" }`.
/// Fields are private so an entry cannot be edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkLogEntry {
    id: LogEntryId,
    #[serde(flatten)]
    payload: LogPayload,
    timestamp: DateTime<Utc>,
}

impl NetworkLogEntry {
    pub fn new(id: LogEntryId, payload: LogPayload, timestamp: DateTime<Utc>) -> Self {
        Self { id, payload, timestamp }
    }

    pub fn outgoing_catalog(catalog_id: CatalogId, catalog: CatalogItem, timestamp: DateTime<Utc>) -> Self {
        Self::new(
            LogEntryId::new(),
            LogPayload::OutgoingCatalog(OutgoingCatalog { catalog_id, catalog }),
            timestamp,
        )
    }

    /// Entry recording a simulated bid.
    pub fn incoming_bid(buyer_id: BuyerId, bid: &BuyerBid) -> Self {
        Self::new(
            LogEntryId::new(),
            LogPayload::IncomingBid(IncomingBid {
                catalog_id: bid.catalog_id,
                buyer_id,
                buyer_name: bid.buyer_name.clone(),
                bid_amount: bid.bid_amount,
            }),
            bid.timestamp,
        )
    }

    pub fn id(&self) -> LogEntryId {
        self.id
    }

    pub fn entry_type(&self) -> LogEntryType {
        self.payload.entry_type()
    }

    pub fn payload(&self) -> &LogPayload {
        &self.payload
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn catalog_id(&self) -> CatalogId {
        self.payload.catalog_id()
    }
}
