//! `mandi-ai`
//!
//! **Responsibility:** turn free-form vernacular offers into schema-valid
//! `CatalogItem`s using an external generative completion capability.
//!
//! - `lexicon`: static vernacular vocabulary + deterministic text scan
//! - `engine`: one completion attempt, validated
//! - `controller`: availability check, bounded retries with backoff, fallback
//!
//! The completion capability sits behind [`CompletionClient`] so it can be
//! replaced with a deterministic stub.

pub mod client;
pub mod controller;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod prompt;
pub mod retry;

pub use client::{CompletionClient, CompletionRequest};
pub use controller::{CatalogTranslator, FallbackReason, TranslationOutcome, TranslationSource};
pub use engine::TranslationEngine;
pub use error::{CompletionError, TranslationError};
pub use lexicon::{scan, LexicalHints};
pub use retry::RetryPolicy;
