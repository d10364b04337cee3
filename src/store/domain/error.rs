//! Errors reported by document store implementations.

use super::DocumentPath;
use thiserror::Error;

/// Result type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    /// The session is not allowed to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The targeted document does not exist.
    #[error("document not found: {0}")]
    NotFound(DocumentPath),

    /// A create targeted a document that already exists.
    #[error("document already exists: {0}")]
    AlreadyExists(DocumentPath),

    /// A batch exceeded the per-commit operation limit.
    #[error("batch of {operations} operations exceeds the limit of {limit}")]
    BatchTooLarge {
        /// Operations in the rejected batch.
        operations: usize,
        /// Maximum operations accepted per batch.
        limit: usize,
    },

    /// An identifier could not be used as a path segment.
    #[error("invalid document identifier: '{0}'")]
    InvalidIdentifier(String),

    /// A document's fields could not be encoded or decoded.
    #[error("malformed document {document}: {reason}")]
    Malformed {
        /// Offending document.
        document: DocumentPath,
        /// Decoder message.
        reason: String,
    },

    /// The live listener was closed by the store.
    #[error("live listener closed")]
    ListenerClosed,
}
