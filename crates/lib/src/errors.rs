//! Error types for document container operations.
//!
//! This module defines structured error types for the path-addressed
//! container operations, providing detailed context for malformed path
//! keys, invalid construction sources, and typed-access failures.
//!
//! "Miss" conditions are never errors: reading or deleting a path that
//! does not resolve is a normal `None`/no-op outcome. Only malformed
//! input surfaces as one of the variants below.

use thiserror::Error;

/// Structured error types for document operations.
///
/// This enum provides specific error variants for the different kinds of
/// malformed input a container operation can receive: bad path keys,
/// non-structural construction sources, appends into values that cannot
/// grow, and the typed-access failures of the JSON helpers.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DocError {
    /// A path contained a key that is not a string or integer scalar
    #[error("invalid path key: {reason}")]
    InvalidKey { reason: String },

    /// A container was constructed from a value that is not a map,
    /// sequence, or other collection
    #[error("invalid container source: {reason}")]
    InvalidContainerSource { reason: String },

    /// An append was attempted into a value that is not a container
    #[error("append target is not a container: found {actual}")]
    AppendTargetNotStructure { actual: String },

    /// No value is stored at the requested path
    #[error("element not found: {key}")]
    ElementNotFound { key: String },

    /// Type mismatch during typed value access
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Serialization of a value failed
    #[error("serialization failed: {reason}")]
    SerializationFailed { reason: String },

    /// Deserialization of a value failed
    #[error("deserialization failed: {reason}")]
    DeserializationFailed { reason: String },
}

impl DocError {
    /// Check if this error is an invalid-path-key rejection
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, DocError::InvalidKey { .. })
    }

    /// Check if this error is an invalid-construction-source rejection
    pub fn is_invalid_source(&self) -> bool {
        matches!(self, DocError::InvalidContainerSource { .. })
    }

    /// Check if this error is an append into a non-container
    pub fn is_append_error(&self) -> bool {
        matches!(self, DocError::AppendTargetNotStructure { .. })
    }

    /// Check if this error is related to element lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocError::ElementNotFound { .. })
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, DocError::TypeMismatch { .. })
    }

    /// Check if this error is related to serialization
    pub fn is_serialization_error(&self) -> bool {
        matches!(
            self,
            DocError::SerializationFailed { .. } | DocError::DeserializationFailed { .. }
        )
    }

    /// Get the key if this is a key-related error
    pub fn key(&self) -> Option<&str> {
        match self {
            DocError::ElementNotFound { key } => Some(key),
            _ => None,
        }
    }
}

// Conversion from DocError to the main Error type
impl From<DocError> for crate::Error {
    fn from(err: DocError) -> Self {
        crate::Error::Doc(err)
    }
}
