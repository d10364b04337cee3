//! Document store port and live subscription handle.

use crate::store::domain::{
    CollectionPath, Document, DocumentId, DocumentPath, Fields, Query, StoreError, StoreResult,
    WriteBatch,
};
use async_trait::async_trait;
use std::fmt;
use tokio::sync::mpsc::{self, error::TryRecvError};

/// One emission of a live query: the full ordered result set, or the
/// terminal failure of the channel.
pub type SnapshotResult = Result<Vec<Document>, StoreError>;

/// Document-oriented remote store contract.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reserves a fresh identifier in a collection without writing anything.
    ///
    /// Used to build batches whose documents reference each other.
    fn allocate_id(&self, collection: &CollectionPath) -> DocumentId;

    /// Creates a document with a store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the write is rejected.
    async fn create(&self, collection: &CollectionPath, fields: Fields)
    -> StoreResult<DocumentId>;

    /// Merges `fields` into an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the document does not exist.
    async fn update(&self, document: &DocumentPath, fields: Fields) -> StoreResult<()>;

    /// Deletes a document. Nested collections are left untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the write is rejected.
    async fn delete(&self, document: &DocumentPath) -> StoreResult<()>;

    /// Runs a one-shot query.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the read fails.
    async fn query(&self, query: &Query) -> StoreResult<Vec<Document>>;

    /// Opens a live query. The current result set is delivered first, then a
    /// full snapshot after every write touching the collection.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the listener cannot be registered.
    fn subscribe(&self, query: Query) -> StoreResult<Subscription>;

    /// Applies every operation of `batch` or none of them.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when any operation is rejected; no operation
    /// is applied in that case.
    async fn commit(&self, batch: WriteBatch) -> StoreResult<()>;
}

type CancelFn = Box<dyn FnOnce() + Send + Sync>;

/// Handle to a live query.
///
/// Snapshots arrive through [`Subscription::recv`]. The listener is removed
/// from the store by [`Subscription::cancel`] or when the handle is dropped.
/// A failure is terminal: it is delivered once and the handle then reports
/// end of stream.
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<SnapshotResult>,
    on_cancel: Option<CancelFn>,
}

impl Subscription {
    /// Wraps a snapshot channel and the action that unregisters its listener.
    #[must_use]
    pub fn new(
        receiver: mpsc::UnboundedReceiver<SnapshotResult>,
        on_cancel: impl FnOnce() + Send + Sync + 'static,
    ) -> Self {
        Self {
            receiver,
            on_cancel: Some(Box::new(on_cancel)),
        }
    }

    /// Waits for the next emission.
    ///
    /// A store that drops the listener is reported once as
    /// [`StoreError::ListenerClosed`]. Returns `None` once the subscription
    /// is cancelled or has failed.
    pub async fn recv(&mut self) -> Option<SnapshotResult> {
        if !self.is_active() {
            return None;
        }
        let emission = self
            .receiver
            .recv()
            .await
            .unwrap_or(Err(StoreError::ListenerClosed));
        Some(self.settle(emission))
    }

    /// Returns an already delivered emission without waiting.
    ///
    /// Returns `None` when nothing is pending. A dropped listener is
    /// reported as in [`Subscription::recv`].
    pub fn try_recv(&mut self) -> Option<SnapshotResult> {
        if !self.is_active() {
            return None;
        }
        let emission = match self.receiver.try_recv() {
            Ok(emission) => emission,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(StoreError::ListenerClosed),
        };
        Some(self.settle(emission))
    }

    /// Unregisters the listener. Pending emissions are discarded.
    pub fn cancel(&mut self) {
        if let Some(on_cancel) = self.on_cancel.take() {
            on_cancel();
        }
        self.receiver.close();
    }

    /// Returns `true` while the subscription can still emit.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.on_cancel.is_some()
    }

    fn settle(&mut self, emission: SnapshotResult) -> SnapshotResult {
        if emission.is_err() {
            self.cancel();
        }
        emission
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}
