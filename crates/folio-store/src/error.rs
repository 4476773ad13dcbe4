//! Error types for the storage layer.

use folio_core::{PageId, ValidationError};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Connection(#[from] sqlx::Error),

    /// Page not found.
    #[error("page not found: {0}")]
    PageNotFound(PageId),

    /// Query attributes failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A stored row could not be turned into a page.
    #[error("invalid row for page {page_id}: {reason}")]
    InvalidRow { page_id: PageId, reason: String },

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl StoreError {
    /// Whether the error was caused by the caller's input rather than the store.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
