//! Mapping errors.
//!
//! The mapper is lossy by default: unmatched tags, incompatible types and
//! absent nested values are silently skipped. Only a malformed destination,
//! or a type mismatch under [`MapOptions::strict`](crate::MapOptions), is an
//! error.

use tagmap_types::Tag;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The destination is not a writable record, or its storage disagrees
    /// with its own descriptor. Raised before any field is written.
    #[error("invalid destination: {reason}")]
    InvalidDestination { reason: String },
    /// Strict mode only: a matched scalar field cannot hold the source value.
    #[error("tag `{tag}`: cannot assign {found} to a field of type {expected}")]
    TypeMismatch {
        tag: Tag,
        expected: String,
        found: String,
    },
}

impl MapError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        MapError::InvalidDestination {
            reason: reason.into(),
        }
    }
}
