use mandi_catalog::{validate, CatalogItem};
use tracing::debug;

use crate::client::CompletionClient;
use crate::error::TranslationError;
use crate::lexicon;
use crate::prompt;

/// Single-attempt translation of vernacular text into a `CatalogItem`.
///
/// Each call makes exactly one external completion request. Fields the
/// completion omitted may be filled from a lexical scan of the input, but a
/// result that still fails validation is returned as an error, never repaired.
#[derive(Debug, Clone)]
pub struct TranslationEngine<C> {
    client: C,
}

impl<C: CompletionClient> TranslationEngine<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn translate(&self, voice_text: &str) -> Result<CatalogItem, TranslationError> {
        let text = voice_text.trim();
        if text.is_empty() {
            return Err(TranslationError::EmptyInput);
        }

        let hints = lexicon::scan(text);
        let request = prompt::build_request(text, &hints);

        let mut raw = self.client.complete(&request).await?;
        hints.fill_missing(&mut raw);
        debug!(raw = %raw, "completion result after lexical fill");

        Ok(validate(&raw)?)
    }
}
