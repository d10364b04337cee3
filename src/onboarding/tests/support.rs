//! Builders shared by the onboarding unit tests.

use crate::{
    onboarding::domain::{Client, ClientId, ClientName, NewTask, Task, TaskId, TaskName},
    session::{Session, UserId},
    store::{
        domain::{
            CollectionPath, Document, DocumentId, DocumentPath, Fields, Query, StoreResult,
            WriteBatch,
        },
        ports::{DocumentStore, Subscription},
    },
};
use chrono::{DateTime, TimeZone, Utc};

pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0)
        .single()
        .expect("valid timestamp")
}

pub fn document_id(raw: &str) -> DocumentId {
    DocumentId::new(raw).expect("valid document id")
}

pub fn client_id(raw: &str) -> ClientId {
    ClientId::from_document_id(document_id(raw))
}

pub fn task_id(raw: &str) -> TaskId {
    TaskId::from_document_id(document_id(raw))
}

pub fn session() -> Session {
    Session::new(UserId::from_document_id(document_id("user-1")))
}

pub fn client(id: &str, seconds: i64) -> Client {
    Client::new(
        client_id(id),
        ClientName::new(format!("Client {id}")).expect("valid client name"),
        at(seconds),
    )
}

/// Task named after its identifier, owned by client `owner`.
pub fn task(id: &str, order: u32, seconds: i64) -> Task {
    Task::new(
        task_id(id),
        NewTask {
            client_id: client_id("owner"),
            name: TaskName::new(id).expect("valid task name"),
            order,
            created_at: at(seconds),
        },
    )
}

pub fn task_names(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.name().as_str()).collect()
}

pub fn orders(tasks: &[Task]) -> Vec<u32> {
    tasks.iter().map(Task::order).collect()
}

mockall::mock! {
    pub Store {}

    #[async_trait::async_trait]
    impl DocumentStore for Store {
        fn allocate_id(&self, collection: &CollectionPath) -> DocumentId;
        async fn create(&self, collection: &CollectionPath, fields: Fields) -> StoreResult<DocumentId>;
        async fn update(&self, document: &DocumentPath, fields: Fields) -> StoreResult<()>;
        async fn delete(&self, document: &DocumentPath) -> StoreResult<()>;
        async fn query(&self, query: &Query) -> StoreResult<Vec<Document>>;
        fn subscribe(&self, query: Query) -> StoreResult<Subscription>;
        async fn commit(&self, batch: WriteBatch) -> StoreResult<()>;
    }
}
