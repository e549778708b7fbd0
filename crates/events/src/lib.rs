//! Network log entries and the bid value they record.
//!
//! Log entries are append-only facts: created once, never mutated or deleted.

pub mod bid;
pub mod entry;

pub use bid::BuyerBid;
pub use entry::{IncomingBid, LogEntryType, LogPayload, NetworkLogEntry, OutgoingCatalog};
