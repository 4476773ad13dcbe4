//! Errors raised while evaluating pagination tags.

use folio_core::ValidationError;
use folio_store::StoreError;
use thiserror::Error;

/// Result type alias for tag evaluation.
pub type TagResult<T> = Result<T, TagError>;

/// A failure rendering one pagination block.
///
/// Validation errors affect only the block that raised them. Store errors
/// are fatal for the whole request.
#[derive(Debug, Error)]
pub enum TagError {
    /// A tag attribute was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The page store failed.
    #[error("store error: {0}")]
    Store(StoreError),

    /// A nested tag was used outside the block it needs.
    #[error("`{tag}' must be used inside `{ancestor}'")]
    Misplaced {
        tag: &'static str,
        ancestor: &'static str,
    },
}

impl From<StoreError> for TagError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(v) => Self::Validation(v),
            other => Self::Store(other),
        }
    }
}

impl TagError {
    /// Whether only the offending block is affected.
    pub fn is_block_local(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}
