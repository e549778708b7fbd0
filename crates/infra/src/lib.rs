//! Infrastructure layer: persistence adapters, external service clients,
//! configuration, and the broadcast simulator.

pub mod broadcast;
pub mod catalog_store;
pub mod config;
pub mod gemini;
pub mod log_store;

pub use broadcast::{
    publish_catalog, round2, BroadcastConfig, BroadcastError, BroadcastHandle, BroadcastSimulator, Buyer,
    SimulationState, BUYERS,
};
pub use catalog_store::{CatalogRecord, CatalogStore, InMemoryCatalogStore, StoreError};
pub use config::AppConfig;
pub use gemini::{GeminiClient, GeminiConfig};
pub use log_store::{InMemoryLogStore, LogStore, LogStoreError};
