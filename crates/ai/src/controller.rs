//! Fallback/retry controller: the public translation entry point.
//!
//! Policy:
//! 1. No usable completion capability: return the fallback entry at once.
//! 2. Otherwise try the engine up to `max_attempts` times, sleeping
//!    `delay_for_attempt(n)` after failed attempt `n` when another attempt follows.
//! 3. First schema-valid result wins.
//! 4. All attempts failed: return the fallback entry.
//!
//! Errors never reach the caller.

use mandi_catalog::{fallback_catalog, CatalogItem};
use serde::Serialize;
use tracing::{info, warn};

use crate::client::CompletionClient;
use crate::engine::TranslationEngine;
use crate::retry::RetryPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FallbackReason {
    /// The completion capability is not configured.
    Unavailable,
    /// Every attempt failed (or a failure was not worth retrying).
    Exhausted { attempts: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranslationSource {
    Generated { attempts: u32 },
    Fallback(FallbackReason),
}

/// A translation result plus where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationOutcome {
    pub item: CatalogItem,
    pub source: TranslationSource,
}

impl TranslationOutcome {
    fn fallback(reason: FallbackReason) -> Self {
        Self {
            item: fallback_catalog(),
            source: TranslationSource::Fallback(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, TranslationSource::Fallback(_))
    }
}

/// Wraps a [`TranslationEngine`] with availability check, retries and fallback.
#[derive(Debug, Clone)]
pub struct CatalogTranslator<C> {
    engine: Option<TranslationEngine<C>>,
    policy: RetryPolicy,
}

impl<C: CompletionClient> CatalogTranslator<C> {
    /// `client = None` means the completion capability is not configured.
    pub fn new(client: Option<C>, policy: RetryPolicy) -> Self {
        Self {
            engine: client.map(TranslationEngine::new),
            policy,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn is_available(&self) -> bool {
        self.usable_engine().is_some()
    }

    fn usable_engine(&self) -> Option<&TranslationEngine<C>> {
        self.engine.as_ref().filter(|e| e.client().is_available())
    }

    /// Always returns a valid `CatalogItem`.
    pub async fn translate_with_fallback(&self, voice_text: &str) -> CatalogItem {
        self.translate_detailed(voice_text).await.item
    }

    /// Same contract as [`Self::translate_with_fallback`], reporting the source.
    ///
    /// Waits happen only between attempts: a run that exhausts `max_attempts`
    /// sleeps `max_attempts - 1` times (1 then 2 units with the default policy)
    /// and returns the fallback right after the last failure.
    pub async fn translate_detailed(&self, voice_text: &str) -> TranslationOutcome {
        let Some(engine) = self.usable_engine() else {
            warn!(reason = "unavailable", "completion capability not configured; using fallback catalog");
            return TranslationOutcome::fallback(FallbackReason::Unavailable);
        };

        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempts = 0;

        while attempts < max_attempts {
            attempts += 1;

            match engine.translate(voice_text).await {
                Ok(item) => {
                    info!(attempt = attempts, name = item.name(), "catalog translation succeeded");
                    return TranslationOutcome {
                        item,
                        source: TranslationSource::Generated { attempts },
                    };
                }
                Err(err) => {
                    warn!(
                        attempt = attempts,
                        max_attempts,
                        reason = %err,
                        "catalog translation attempt failed"
                    );

                    if !err.is_retryable() {
                        break;
                    }
                    if attempts < max_attempts {
                        tokio::time::sleep(self.policy.delay_for_attempt(attempts)).await;
                    }
                }
            }
        }

        warn!(reason = "exhausted", attempts, "translation attempts exhausted; using fallback catalog");
        TranslationOutcome::fallback(FallbackReason::Exhausted { attempts })
    }
}
