use mandi_catalog::ValidationErrors;
use thiserror::Error;

/// Failure of the external completion capability.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    #[error("completion capability not configured")]
    Unavailable,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("completion request timed out")]
    Timeout,

    #[error("completion returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    Malformed(String),
}

/// Failure of a single translation attempt.
#[derive(Debug, Clone, Error)]
pub enum TranslationError {
    #[error("nothing to translate: input text is empty")]
    EmptyInput,

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl TranslationError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            TranslationError::EmptyInput | TranslationError::Completion(CompletionError::Unavailable)
        )
    }
}
