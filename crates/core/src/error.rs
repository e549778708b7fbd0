//! Domain error model.

use thiserror::Error;

/// Domain-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_id_message() {
        assert_eq!(
            DomainError::invalid_id("CatalogId: bad length").to_string(),
            "invalid identifier: CatalogId: bad length"
        );
    }
}
