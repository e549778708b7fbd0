use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::CompletionError;

/// A structured completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Standing instructions (role, output rules).
    pub system: String,
    /// The per-call prompt (raw text + lexical context).
    pub prompt: String,
    /// JSON schema the structured result must follow.
    pub target_schema: JsonValue,
}

/// External generative completion capability.
///
/// Implementations are expected to enforce their own timeout. One call to
/// `complete` is exactly one external request; retries live in the controller.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<JsonValue, CompletionError>;

    /// Whether the capability is configured and usable at all.
    fn is_available(&self) -> bool {
        true
    }
}

#[async_trait]
impl<C> CompletionClient for Arc<C>
where
    C: CompletionClient + ?Sized,
{
    async fn complete(&self, request: &CompletionRequest) -> Result<JsonValue, CompletionError> {
        (**self).complete(request).await
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}
