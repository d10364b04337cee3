//! Atomic write batches.

use super::{DocumentPath, Fields};

/// Operation limit applied to a single batch unless configured otherwise.
pub const DEFAULT_MAX_BATCH_OPERATIONS: usize = 500;

/// One write inside a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOperation {
    /// Creates a document that must not exist yet.
    Create {
        /// Target document.
        document: DocumentPath,
        /// Initial field map.
        fields: Fields,
    },
    /// Merges fields into an existing document.
    Update {
        /// Target document.
        document: DocumentPath,
        /// Fields to overwrite.
        fields: Fields,
    },
    /// Deletes a document. Deleting a missing document is not an error.
    Delete {
        /// Target document.
        document: DocumentPath,
    },
}

impl WriteOperation {
    /// Returns the document this operation targets.
    #[must_use]
    pub const fn document(&self) -> &DocumentPath {
        match self {
            Self::Create { document, .. }
            | Self::Update { document, .. }
            | Self::Delete { document } => document,
        }
    }
}

/// Ordered set of writes committed as a unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    operations: Vec<WriteOperation>,
}

impl WriteBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a document creation.
    pub fn create(&mut self, document: DocumentPath, fields: Fields) -> &mut Self {
        self.operations
            .push(WriteOperation::Create { document, fields });
        self
    }

    /// Queues a partial field update.
    pub fn update(&mut self, document: DocumentPath, fields: Fields) -> &mut Self {
        self.operations
            .push(WriteOperation::Update { document, fields });
        self
    }

    /// Queues a document deletion.
    pub fn delete(&mut self, document: DocumentPath) -> &mut Self {
        self.operations.push(WriteOperation::Delete { document });
        self
    }

    /// Returns the number of queued operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` when no operation is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Returns the queued operations in commit order.
    #[must_use]
    pub fn operations(&self) -> &[WriteOperation] {
        &self.operations
    }

    /// Consumes the batch and returns its operations.
    #[must_use]
    pub fn into_operations(self) -> Vec<WriteOperation> {
        self.operations
    }
}
