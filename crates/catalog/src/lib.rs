//! Catalog domain module.
//!
//! This crate owns the canonical product offer (`CatalogItem`), the schema
//! validator that is the only way to construct one, the fixed fallback entry,
//! and the JSON schema handed to the generative completion capability.
//! Everything here is deterministic domain logic (no IO, no HTTP, no storage).

pub mod fallback;
pub mod item;
pub mod schema;
pub mod validate;

pub use fallback::fallback_catalog;
pub use item::{Available, CatalogItem, CatalogStatus, Descriptor, Price, Quantity, Tags};
pub use schema::catalog_json_schema;
pub use validate::{validate, ValidationError, ValidationErrors, DEFAULT_CURRENCY, DEFAULT_SYMBOL, DEFAULT_UNIT};
