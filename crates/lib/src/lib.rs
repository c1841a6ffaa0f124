//!
//! Keytree: recursively-nested, insertion-ordered key/value containers
//! with path-addressed access.
//!
//! ## Core Concepts
//!
//! Keytree is built around a small set of types:
//!
//! * **Documents (`doc::Document`)**: the container. An insertion-ordered
//!   collection of scalar-keyed entries whose values may themselves be
//!   containers, so arbitrarily deep trees are one uniform structure.
//! * **Values (`doc::Value`)**: the recursive value type: scalars,
//!   opaque pass-through records, or nested documents.
//! * **Paths (`doc::Path`)**: an ordered list of typed segments (string
//!   or integer keys, or the append sentinel) addressing a location in a
//!   tree. There is no string syntax; callers supply the keys directly.
//! * **Schema discovery (`Document::schema`)**: a read-only pass that
//!   finds every leaf key name and the distinct map-key paths reaching
//!   it, with sequence indices elided.
//! * **Plain trees (`Document::to_plain`)**: the serialization boundary.
//!   Collaborators encode the fully-materialized `serde_json::Value`
//!   tree, never the container itself.
//!
//! Writes create missing structure on the way down, deletes prune
//! emptied structure on the way back up, and misses are ordinary `None`
//! results rather than errors.

pub mod doc;
pub mod errors;

/// Re-export the core types for easier access.
pub use doc::{Document, IntoPath, Key, Path, Segment, Value};

/// Result type used throughout the keytree library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the keytree library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured document errors from the doc module
    #[error(transparent)]
    Doc(errors::DocError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Doc(_) => "doc",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a value was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Doc(doc_err) => doc_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates malformed caller input (a bad path
    /// key, an invalid construction source, or an append into a value
    /// that cannot grow).
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Error::Doc(doc_err) => {
                doc_err.is_invalid_key() || doc_err.is_invalid_source() || doc_err.is_append_error()
            }
            _ => false,
        }
    }
}
