//! Value types shared by every document store implementation.

mod batch;
mod document;
mod error;
mod path;

pub use batch::{DEFAULT_MAX_BATCH_OPERATIONS, WriteBatch, WriteOperation};
pub use document::{Direction, Document, Fields, OrderBy, Query};
pub use error::{StoreError, StoreResult};
pub use path::{CollectionPath, DocumentId, DocumentPath};
