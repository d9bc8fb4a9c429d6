//! Query evaluation shared by the document store implementations.

use folio_core::store::{
    CREATED_AT_FIELD, Direction, Filter, FilterOp, ID_FIELD, Query, RawDocument,
};
use serde_json::Value;
use std::cmp::Ordering;

/// Total order over JSON values.
///
/// Values of different kinds order as null < bool < number < string <
/// array < object. Dates and timestamps are stored as fixed-width strings,
/// so they compare chronologically.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y.iter())
            .map(|(l, r)| compare_values(l, r))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn field<'a>(document: &'a RawDocument, name: &str) -> &'a Value {
    document.get(name).unwrap_or(&Value::Null)
}

pub fn matches(document: &RawDocument, filter: &Filter) -> bool {
    let value = field(document, &filter.field);
    match filter.op {
        FilterOp::Eq => compare_values(value, &filter.value) == Ordering::Equal,
        // range filters never match a missing field
        FilterOp::Gte => {
            !value.is_null() && compare_values(value, &filter.value) != Ordering::Less
        }
        FilterOp::Lte => {
            !value.is_null() && compare_values(value, &filter.value) != Ordering::Greater
        }
        FilterOp::ArrayContains => value
            .as_array()
            .is_some_and(|items| items.iter().any(|item| item == &filter.value)),
    }
}

/// Filters, orders and limits `documents`.
///
/// Ordering is stable, so documents that tie keep their input order.
pub fn apply(documents: Vec<RawDocument>, query: &Query) -> Vec<RawDocument> {
    let mut result: Vec<RawDocument> = documents
        .into_iter()
        .filter(|doc| query.filters.iter().all(|f| matches(doc, f)))
        .collect();

    if let Some(order) = &query.order_by {
        result.sort_by(|a, b| {
            let ordering = compare_values(field(a, &order.field), field(b, &order.field));
            match order.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        });
    }

    if let Some(limit) = query.limit {
        result.truncate(limit);
    }
    result
}

/// Orders documents by creation time then id, the store's natural order.
pub fn natural_order(documents: &mut [RawDocument]) {
    documents.sort_by(|a, b| {
        compare_values(field(a, CREATED_AT_FIELD), field(b, CREATED_AT_FIELD))
            .then_with(|| compare_values(field(a, ID_FIELD), field(b, ID_FIELD)))
    });
}
