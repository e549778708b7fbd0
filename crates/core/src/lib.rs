//! `mandi-core`: shared building blocks for the marketplace crates.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;

pub use error::DomainError;
pub use id::{BuyerId, CatalogId, LogEntryId};
