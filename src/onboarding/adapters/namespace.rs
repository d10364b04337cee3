//! Per-user collection layout.
//!
//! Clients live at `users/{uid}/clients/{clientId}` and each client's tasks
//! at `users/{uid}/clients/{clientId}/tasks/{taskId}`.

use super::documents::{FIELD_CREATED_AT, FIELD_ORDER};
use crate::{
    onboarding::domain::{ClientId, TaskId},
    session::Session,
    store::domain::{CollectionPath, Direction, DocumentPath, Query},
};

const USERS: &str = "users";
const CLIENTS: &str = "clients";
const TASKS: &str = "tasks";

/// Returns the session user's client collection.
#[must_use]
pub fn clients_collection(session: &Session) -> CollectionPath {
    CollectionPath::root(USERS)
        .document(session.user_id().as_document_id().clone())
        .subcollection(CLIENTS)
}

/// Returns the document path of a client.
#[must_use]
pub fn client_document(session: &Session, client_id: &ClientId) -> DocumentPath {
    clients_collection(session).document(client_id.as_document_id().clone())
}

/// Returns a client's task collection.
#[must_use]
pub fn tasks_collection(session: &Session, client_id: &ClientId) -> CollectionPath {
    client_document(session, client_id).subcollection(TASKS)
}

/// Returns the document path of a task.
#[must_use]
pub fn task_document(session: &Session, client_id: &ClientId, task_id: &TaskId) -> DocumentPath {
    tasks_collection(session, client_id).document(task_id.as_document_id().clone())
}

/// Clients ordered by creation time, oldest first.
#[must_use]
pub fn clients_query(session: &Session) -> Query {
    Query::collection(clients_collection(session)).order_by(FIELD_CREATED_AT, Direction::Ascending)
}

/// A client's tasks in display order.
#[must_use]
pub fn tasks_query(session: &Session, client_id: &ClientId) -> Query {
    Query::collection(tasks_collection(session, client_id))
        .order_by(FIELD_ORDER, Direction::Ascending)
        .order_by(FIELD_CREATED_AT, Direction::Ascending)
}
