//! Broadcast action and the buyer-bid simulator.
//!
//! `publish_catalog` marks a catalog as broadcast and records the outgoing
//! entry. `BroadcastSimulator` then produces one synthetic bid per simulation,
//! after a fixed delay, and records it as an incoming entry.

mod buyers;
mod publish;
mod simulator;

use thiserror::Error;

use mandi_core::CatalogId;

use crate::catalog_store::StoreError;
use crate::log_store::LogStoreError;

pub use buyers::{Buyer, BUYERS};
pub use publish::publish_catalog;
pub use simulator::{round2, BroadcastConfig, BroadcastHandle, BroadcastSimulator, SimulationState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastError {
    #[error("catalog not found: {0}")]
    NotFound(CatalogId),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("a simulation for catalog {0} is already pending")]
    AlreadyPending(CatalogId),

    #[error("simulation task aborted: {0}")]
    Aborted(String),
}

impl From<StoreError> for BroadcastError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => BroadcastError::NotFound(id),
            StoreError::Storage(msg) => BroadcastError::Persistence(msg),
        }
    }
}

impl From<LogStoreError> for BroadcastError {
    fn from(err: LogStoreError) -> Self {
        BroadcastError::Persistence(err.to_string())
    }
}
