use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mandi_core::CatalogId;

/// Synthetic offer produced by one broadcast simulation.
///
/// Ephemeral: the simulator returns it and records an `INCOMING_BID` log entry,
/// but the bid itself is not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerBid {
    pub buyer_name: String,
    /// Rounded to two decimal places.
    pub bid_amount: f64,
    pub timestamp: DateTime<Utc>,
    pub catalog_id: CatalogId,
}
