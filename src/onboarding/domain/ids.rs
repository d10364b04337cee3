//! Identifier types for onboarding entities.

use crate::store::domain::DocumentId;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! document_backed_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(DocumentId);

        impl $name {
            /// Wraps a store-assigned document identifier.
            #[must_use]
            pub const fn from_document_id(id: DocumentId) -> Self {
                Self(id)
            }

            /// Returns the underlying document identifier.
            #[must_use]
            pub const fn as_document_id(&self) -> &DocumentId {
                &self.0
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<DocumentId> for $name {
            fn from(id: DocumentId) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

document_backed_id!(
    /// Store-assigned identifier of a client.
    ClientId
);

document_backed_id!(
    /// Store-assigned identifier of a task.
    TaskId
);
