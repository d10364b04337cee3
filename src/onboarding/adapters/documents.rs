//! Field-map encoding of clients and tasks.
//!
//! Timestamps are stored as RFC 3339 UTC strings with fixed microsecond
//! precision so that string comparison in the store matches time order.
//! Due dates are stored as `YYYY-MM-DD` or `null`.

use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    onboarding::domain::{
        Client, ClientId, ClientName, NewTask, PersistedTaskData, Task, TaskId, TaskName,
        TaskPriority, TaskStatus,
    },
    store::domain::{Document, DocumentId, DocumentPath, Fields, StoreError, StoreResult},
};

/// Name field of clients and tasks.
pub const FIELD_NAME: &str = "name";
/// Creation timestamp field of clients and tasks.
pub const FIELD_CREATED_AT: &str = "createdAt";
/// Owning client field of tasks.
pub const FIELD_CLIENT_ID: &str = "clientId";
/// Status field of tasks.
pub const FIELD_STATUS: &str = "status";
/// Priority field of tasks.
pub const FIELD_PRIORITY: &str = "priority";
/// Due date field of tasks.
pub const FIELD_DUE_DATE: &str = "dueDate";
/// Display position field of tasks.
pub const FIELD_ORDER: &str = "order";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientRecord {
    name: String,
    created_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    client_id: String,
    name: String,
    status: TaskStatus,
    #[serde(default)]
    priority: TaskPriority,
    #[serde(default)]
    due_date: Option<String>,
    created_at: String,
    order: u32,
}

/// Encodes a client for a create write.
#[must_use]
pub fn client_fields(client: &Client) -> Fields {
    Fields::from_iter([
        (FIELD_NAME.to_owned(), Value::from(client.name().as_str())),
        (
            FIELD_CREATED_AT.to_owned(),
            Value::from(encode_timestamp(client.created_at())),
        ),
    ])
}

/// Encodes a task that has not been written yet.
///
/// New tasks are stored `Pending` with `Normal` priority and a `null` due
/// date.
#[must_use]
pub fn new_task_fields(task: &NewTask) -> Fields {
    Fields::from_iter([
        (FIELD_CLIENT_ID.to_owned(), Value::from(task.client_id.as_str())),
        (FIELD_NAME.to_owned(), Value::from(task.name.as_str())),
        (
            FIELD_STATUS.to_owned(),
            Value::from(TaskStatus::default().as_str()),
        ),
        (
            FIELD_PRIORITY.to_owned(),
            Value::from(TaskPriority::default().as_str()),
        ),
        (FIELD_DUE_DATE.to_owned(), Value::Null),
        (
            FIELD_CREATED_AT.to_owned(),
            Value::from(encode_timestamp(task.created_at)),
        ),
        (FIELD_ORDER.to_owned(), Value::from(task.order)),
    ])
}

/// Decodes a client snapshot document.
///
/// # Errors
///
/// Returns [`StoreError::Malformed`] when a field is missing or invalid.
pub fn decode_client(document: &Document) -> StoreResult<Client> {
    let record: ClientRecord = from_fields(document)?;
    let name = ClientName::new(&record.name).map_err(|err| malformed(document.path(), err))?;
    let created_at = decode_timestamp(&record.created_at, document.path())?;
    Ok(Client::new(
        ClientId::from_document_id(document.id().clone()),
        name,
        created_at,
    ))
}

/// Decodes a task snapshot document.
///
/// # Errors
///
/// Returns [`StoreError::Malformed`] when a field is missing or invalid.
pub fn decode_task(document: &Document) -> StoreResult<Task> {
    let path = document.path();
    let record: TaskRecord = from_fields(document)?;
    let client_id = DocumentId::new(record.client_id).map_err(|err| malformed(path, err))?;
    let name = TaskName::new(&record.name).map_err(|err| malformed(path, err))?;
    let due_date = record
        .due_date
        .as_deref()
        .map(|raw| NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|err| malformed(path, err)))
        .transpose()?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_document_id(document.id().clone()),
        client_id: ClientId::from_document_id(client_id),
        name,
        status: record.status,
        priority: record.priority,
        due_date,
        created_at: decode_timestamp(&record.created_at, path)?,
        order: record.order,
    }))
}

/// Single-field update of a task or client name.
#[must_use]
pub fn name_update(name: &str) -> Fields {
    single_field(FIELD_NAME, Value::String(name.to_owned()))
}

/// Single-field update of a task status.
#[must_use]
pub fn status_update(status: TaskStatus) -> Fields {
    single_field(FIELD_STATUS, Value::String(status.as_str().to_owned()))
}

/// Single-field update of a task priority.
#[must_use]
pub fn priority_update(priority: TaskPriority) -> Fields {
    single_field(FIELD_PRIORITY, Value::String(priority.as_str().to_owned()))
}

/// Single-field update setting or clearing a task due date.
#[must_use]
pub fn due_date_update(due_date: Option<NaiveDate>) -> Fields {
    let value = due_date.map_or(Value::Null, |date| Value::String(encode_date(date)));
    single_field(FIELD_DUE_DATE, value)
}

/// Single-field update of a task display position.
#[must_use]
pub fn order_update(order: u32) -> Fields {
    single_field(FIELD_ORDER, Value::from(order))
}

fn single_field(field: &str, value: Value) -> Fields {
    Fields::from_iter([(field.to_owned(), value)])
}

/// Drops the sub-microsecond part of `timestamp`, which stored documents do
/// not keep. Entities built locally must use it so they match their stored
/// copy.
#[must_use]
pub fn stored_precision(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.trunc_subsecs(6)
}

fn encode_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str, document: &DocumentPath) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|err| malformed(document, err))
}

fn encode_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn from_fields<T: DeserializeOwned>(document: &Document) -> StoreResult<T> {
    serde_json::from_value(Value::Object(document.fields().clone()))
        .map_err(|err| malformed(document.path(), err))
}

fn malformed(document: &DocumentPath, reason: impl ToString) -> StoreError {
    StoreError::Malformed {
        document: document.clone(),
        reason: reason.to_string(),
    }
}
