//! Validation errors raised while interpreting tag attributes.

use thiserror::Error;

/// Result type alias for attribute validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised synchronously, before any store access, when a pagination
/// block is configured with attributes it cannot honour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `by` does not name a field of the requesting page.
    #[error("`by' attribute must be set to a valid field name, got {field:?}")]
    UnknownOrderField { field: String },

    /// `order` is neither `asc` nor `desc`.
    #[error("`order' attribute must be set to either \"asc\" or \"desc\", got {value:?}")]
    InvalidOrderDirection { value: String },

    /// Any other attribute with an unusable value.
    #[error("invalid value {value:?} for attribute `{name}': {reason}")]
    InvalidAttribute {
        name: String,
        value: String,
        reason: String,
    },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::InvalidAttribute`].
    pub fn invalid_attribute(
        name: &str,
        value: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
