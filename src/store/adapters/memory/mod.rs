//! In-memory document store.
//!
//! Mirrors the hosted store's observable behaviour closely enough for tests
//! and local sessions: atomic batches, partial merges, sorted queries, and
//! live listeners that receive a full snapshot after every write touching
//! their collection. Faults can be injected to exercise failure paths.

mod sort;

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use tokio::sync::mpsc;
use tracing::debug;

use crate::store::{
    domain::{
        CollectionPath, DEFAULT_MAX_BATCH_OPERATIONS, Document, DocumentId, DocumentPath, Fields,
        Query, StoreError, StoreResult, WriteBatch, WriteOperation,
    },
    ports::{DocumentStore, SnapshotResult, Subscription},
};

/// Thread-safe in-memory document store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug)]
struct StoreState {
    documents: BTreeMap<DocumentPath, Fields>,
    listeners: HashMap<u64, Listener>,
    next_listener_id: u64,
    batch_limit: usize,
    write_fault: Option<StoreError>,
    read_fault: Option<StoreError>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            documents: BTreeMap::new(),
            listeners: HashMap::new(),
            next_listener_id: 0,
            batch_limit: DEFAULT_MAX_BATCH_OPERATIONS,
            write_fault: None,
            read_fault: None,
        }
    }
}

#[derive(Debug)]
struct Listener {
    query: Query,
    sender: mpsc::UnboundedSender<SnapshotResult>,
}

impl InMemoryDocumentStore {
    /// Creates an empty store with the default batch limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store accepting at most `limit` operations per batch.
    #[must_use]
    pub fn with_batch_limit(limit: usize) -> Self {
        let state = StoreState {
            batch_limit: limit,
            ..StoreState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Makes every subsequent write fail with `error` until cleared.
    pub fn fail_writes_with(&self, error: StoreError) {
        if let Ok(mut state) = self.state.write() {
            state.write_fault = Some(error);
        }
    }

    /// Makes every subsequent query and subscription fail with `error` until
    /// cleared.
    pub fn fail_reads_with(&self, error: StoreError) {
        if let Ok(mut state) = self.state.write() {
            state.read_fault = Some(error);
        }
    }

    /// Removes injected write and read faults.
    pub fn clear_faults(&self) {
        if let Ok(mut state) = self.state.write() {
            state.write_fault = None;
            state.read_fault = None;
        }
    }

    /// Delivers `error` to every live listener and drops them, as when the
    /// connection to the hosted store is lost.
    pub fn break_listeners(&self, error: &StoreError) {
        if let Ok(mut state) = self.state.write() {
            for (_, listener) in state.listeners.drain() {
                // A closed receiver has nothing left to notify.
                let _closed = listener.sender.send(Err(error.clone()));
            }
        }
    }

    /// Drops every live listener without sending anything, as a store whose
    /// connection goes away silently.
    pub fn disconnect_listeners(&self) {
        if let Ok(mut state) = self.state.write() {
            state.listeners.clear();
        }
    }

    /// Returns the number of registered live listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.state
            .read()
            .map(|state| state.listeners.len())
            .unwrap_or_default()
    }

    /// Returns the fields of a stored document.
    #[must_use]
    pub fn document(&self, path: &DocumentPath) -> Option<Fields> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.documents.get(path).cloned())
    }

    /// Returns the documents of a collection in identifier order.
    #[must_use]
    pub fn documents_in(&self, collection: &CollectionPath) -> Vec<Document> {
        self.state
            .read()
            .map(|state| collection_documents(&state.documents, collection))
            .unwrap_or_default()
    }

    fn read_state(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|err| StoreError::Unavailable(err.to_string()))
    }

    fn write_state(&self) -> StoreResult<RwLockWriteGuard<'_, StoreState>> {
        let state = self
            .state
            .write()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        if let Some(fault) = &state.write_fault {
            return Err(fault.clone());
        }
        Ok(state)
    }
}

fn collection_documents(
    documents: &BTreeMap<DocumentPath, Fields>,
    collection: &CollectionPath,
) -> Vec<Document> {
    documents
        .iter()
        .filter(|(path, _)| path.collection() == collection)
        .map(|(path, fields)| Document::new(path.clone(), fields.clone()))
        .collect()
}

fn run_query(documents: &BTreeMap<DocumentPath, Fields>, query: &Query) -> Vec<Document> {
    let mut results = collection_documents(documents, query.target());
    results.sort_by(|left, right| sort::compare_documents(left, right, query.sort_keys()));
    results
}

/// Pushes a fresh snapshot to every listener on a touched collection and
/// drops listeners whose receiver is gone.
fn notify(state: &mut StoreState, touched: &HashSet<CollectionPath>) {
    let StoreState {
        documents,
        listeners,
        ..
    } = state;
    let mut closed = Vec::new();
    for (id, listener) in listeners.iter() {
        if !touched.contains(listener.query.target()) {
            continue;
        }
        let snapshot = run_query(documents, &listener.query);
        if listener.sender.send(Ok(snapshot)).is_err() {
            closed.push(*id);
        }
    }
    for id in closed {
        listeners.remove(&id);
    }
}

fn apply_operation(
    documents: &mut BTreeMap<DocumentPath, Fields>,
    operation: WriteOperation,
) -> StoreResult<()> {
    match operation {
        WriteOperation::Create { document, fields } => {
            if documents.contains_key(&document) {
                return Err(StoreError::AlreadyExists(document));
            }
            documents.insert(document, fields);
        }
        WriteOperation::Update { document, fields } => {
            let existing = documents
                .get_mut(&document)
                .ok_or_else(|| StoreError::NotFound(document.clone()))?;
            existing.extend(fields);
        }
        WriteOperation::Delete { document } => {
            documents.remove(&document);
        }
    }
    Ok(())
}

fn unregister(state: &Weak<RwLock<StoreState>>, listener_id: u64) {
    let Some(state) = state.upgrade() else {
        return;
    };
    if let Ok(mut guard) = state.write() {
        guard.listeners.remove(&listener_id);
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn allocate_id(&self, _collection: &CollectionPath) -> DocumentId {
        DocumentId::generate()
    }

    async fn create(
        &self,
        collection: &CollectionPath,
        fields: Fields,
    ) -> StoreResult<DocumentId> {
        let id = self.allocate_id(collection);
        let mut state = self.write_state()?;
        apply_operation(
            &mut state.documents,
            WriteOperation::Create {
                document: collection.document(id.clone()),
                fields,
            },
        )?;
        notify(&mut state, &HashSet::from([collection.clone()]));
        Ok(id)
    }

    async fn update(&self, document: &DocumentPath, fields: Fields) -> StoreResult<()> {
        let mut state = self.write_state()?;
        apply_operation(
            &mut state.documents,
            WriteOperation::Update {
                document: document.clone(),
                fields,
            },
        )?;
        notify(&mut state, &HashSet::from([document.collection().clone()]));
        Ok(())
    }

    async fn delete(&self, document: &DocumentPath) -> StoreResult<()> {
        let mut state = self.write_state()?;
        apply_operation(
            &mut state.documents,
            WriteOperation::Delete {
                document: document.clone(),
            },
        )?;
        notify(&mut state, &HashSet::from([document.collection().clone()]));
        Ok(())
    }

    async fn query(&self, query: &Query) -> StoreResult<Vec<Document>> {
        let state = self.read_state()?;
        if let Some(fault) = &state.read_fault {
            return Err(fault.clone());
        }
        Ok(run_query(&state.documents, query))
    }

    fn subscribe(&self, query: Query) -> StoreResult<Subscription> {
        let mut state = self
            .state
            .write()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        if let Some(fault) = &state.read_fault {
            return Err(fault.clone());
        }

        let (sender, receiver) = mpsc::unbounded_channel();
        sender
            .send(Ok(run_query(&state.documents, &query)))
            .map_err(|_| StoreError::ListenerClosed)?;

        let listener_id = state.next_listener_id;
        state.next_listener_id += 1;
        debug!(listener_id, collection = %query.target(), "registered live listener");
        state.listeners.insert(listener_id, Listener { query, sender });

        let weak_state = Arc::downgrade(&self.state);
        Ok(Subscription::new(receiver, move || {
            unregister(&weak_state, listener_id);
        }))
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let mut state = self.write_state()?;
        if batch.len() > state.batch_limit {
            return Err(StoreError::BatchTooLarge {
                operations: batch.len(),
                limit: state.batch_limit,
            });
        }

        let mut staged = state.documents.clone();
        let mut touched = HashSet::new();
        for operation in batch.into_operations() {
            touched.insert(operation.document().collection().clone());
            apply_operation(&mut staged, operation)?;
        }

        state.documents = staged;
        notify(&mut state, &touched);
        Ok(())
    }
}
