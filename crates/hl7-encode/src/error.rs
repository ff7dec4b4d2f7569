//! Error types for message assembly.

use thiserror::Error;

/// Errors that can occur while assembling a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A required field resolved to empty text from every source.
    #[error("{segment}-{field} is required; provide a value (mapping or default)")]
    MissingRequiredField { segment: String, field: u32 },
}

/// Result type alias for assembly operations.
pub type Result<T> = std::result::Result<T, BuildError>;

impl BuildError {
    pub(crate) fn missing_required(segment: impl Into<String>, field: u32) -> Self {
        Self::MissingRequiredField {
            segment: segment.into(),
            field,
        }
    }
}
