//! Hierarchical collection and document paths.
//!
//! Paths alternate collection names and document identifiers, for example
//! `users/{uid}/clients/{clientId}/tasks`. Collection names are compile-time
//! constants; identifiers are validated on construction.

use super::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, store-assigned document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wraps an identifier received from the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidIdentifier`] when the value is empty or
    /// contains a path separator.
    pub fn new(value: impl Into<String>) -> Result<Self, StoreError> {
        let raw = value.into();
        if raw.trim().is_empty() || raw.contains('/') {
            return Err(StoreError::InvalidIdentifier(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Path to a collection of documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath {
    parent: Option<Box<DocumentPath>>,
    name: &'static str,
}

impl CollectionPath {
    /// Creates a top-level collection path.
    #[must_use]
    pub const fn root(name: &'static str) -> Self {
        Self { parent: None, name }
    }

    /// Returns the collection name (the last path segment).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the document this collection is nested under, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&DocumentPath> {
        self.parent.as_deref()
    }

    /// Returns the path of a document inside this collection.
    #[must_use]
    pub fn document(&self, id: DocumentId) -> DocumentPath {
        DocumentPath {
            collection: self.clone(),
            id,
        }
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent {
            Some(parent) => write!(f, "{parent}/{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Path to a single document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath {
    collection: CollectionPath,
    id: DocumentId,
}

impl DocumentPath {
    /// Returns the collection holding this document.
    #[must_use]
    pub const fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    /// Returns the document identifier.
    #[must_use]
    pub const fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Returns the path of a collection nested below this document.
    #[must_use]
    pub fn subcollection(&self, name: &'static str) -> CollectionPath {
        CollectionPath {
            parent: Some(Box::new(self.clone())),
            name,
        }
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}
