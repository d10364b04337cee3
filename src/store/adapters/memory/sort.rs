//! Field-value ordering for query results.

use crate::store::domain::{Direction, Document, OrderBy};
use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Compares two documents by the query's sort keys, then by identifier.
pub(super) fn compare_documents(left: &Document, right: &Document, keys: &[OrderBy]) -> Ordering {
    keys.iter()
        .map(|key| {
            let ordering = compare_values(left.get(key.field), right.get(key.field));
            match key.direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| left.id().cmp(right.id()))
}

/// Missing and null values sort first, then booleans, numbers, strings,
/// arrays and objects.
const fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => compare_numbers(a, b),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        _ => type_rank(left).cmp(&type_rank(right)),
    }
}

fn compare_numbers(left: &Number, right: &Number) -> Ordering {
    match (left.as_i64(), right.as_i64()) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => left
            .as_f64()
            .partial_cmp(&right.as_f64())
            .unwrap_or(Ordering::Equal),
    }
}
