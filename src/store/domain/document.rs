//! Documents and collection queries.

use super::{CollectionPath, DocumentId, DocumentPath};
use serde_json::Value;

/// Field map carried by a document.
pub type Fields = serde_json::Map<String, Value>;

/// A stored document: its path plus its field map.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    path: DocumentPath,
    fields: Fields,
}

impl Document {
    /// Creates a document value.
    #[must_use]
    pub const fn new(path: DocumentPath, fields: Fields) -> Self {
        Self { path, fields }
    }

    /// Returns the document path.
    #[must_use]
    pub const fn path(&self) -> &DocumentPath {
        &self.path
    }

    /// Returns the document identifier.
    #[must_use]
    pub const fn id(&self) -> &DocumentId {
        self.path.id()
    }

    /// Returns the field map.
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Returns a single field value, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Sort direction for a query field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

/// One sort key of a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderBy {
    /// Field name to sort by.
    pub field: &'static str,
    /// Sort direction.
    pub direction: Direction,
}

/// Query over one collection with an ordered list of sort keys.
///
/// Documents comparing equal on every key are returned in identifier order
/// so snapshots are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    collection: CollectionPath,
    order_by: Vec<OrderBy>,
}

impl Query {
    /// Creates an unsorted query over a collection.
    #[must_use]
    pub const fn collection(collection: CollectionPath) -> Self {
        Self {
            collection,
            order_by: Vec::new(),
        }
    }

    /// Appends a sort key.
    #[must_use]
    pub fn order_by(mut self, field: &'static str, direction: Direction) -> Self {
        self.order_by.push(OrderBy { field, direction });
        self
    }

    /// Returns the queried collection.
    #[must_use]
    pub const fn target(&self) -> &CollectionPath {
        &self.collection
    }

    /// Returns the sort keys in priority order.
    #[must_use]
    pub fn sort_keys(&self) -> &[OrderBy] {
        &self.order_by
    }
}
