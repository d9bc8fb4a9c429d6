//! Server-side identity and timestamp handling for stored documents.

use chrono::{DateTime, SecondsFormat, Utc};
use folio_core::store::{CREATED_AT_FIELD, ID_FIELD, RawDocument, UPDATED_AT_FIELD};
use serde_json::Value;

/// Fixed-width RFC 3339 so timestamps order correctly as strings.
pub fn timestamp(now: DateTime<Utc>) -> Value {
    Value::String(now.to_rfc3339_opts(SecondsFormat::Micros, true))
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Builds a fresh document: caller-supplied identity and timestamps are
/// replaced by the server's.
pub fn stamp_new(mut document: RawDocument, id: &str, now: DateTime<Utc>) -> RawDocument {
    document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    document.insert(CREATED_AT_FIELD.to_string(), timestamp(now));
    document.insert(UPDATED_AT_FIELD.to_string(), timestamp(now));
    document
}

/// Merges `patch` into `existing` at the top level and refreshes `updatedAt`.
///
/// `id` and `createdAt` in the patch are ignored.
pub fn merge_patch(existing: &mut RawDocument, patch: RawDocument, now: DateTime<Utc>) {
    for (key, value) in patch {
        if key == ID_FIELD || key == CREATED_AT_FIELD {
            continue;
        }
        existing.insert(key, value);
    }
    existing.insert(UPDATED_AT_FIELD.to_string(), timestamp(now));
}

/// Adds `delta` to a numeric field; missing or non-numeric values count as 0.
pub fn apply_increment(document: &mut RawDocument, field: &str, delta: i64, now: DateTime<Utc>) {
    let current = document.get(field).and_then(Value::as_i64).unwrap_or(0);
    document.insert(field.to_string(), Value::from(current.saturating_add(delta)));
    document.insert(UPDATED_AT_FIELD.to_string(), timestamp(now));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_merge_keeps_created_at() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let mut doc = stamp_new(RawDocument::new(), "p1", created);

        let mut patch = RawDocument::new();
        patch.insert("title".to_string(), json!("Demo"));
        patch.insert(CREATED_AT_FIELD.to_string(), json!("1999-01-01"));
        merge_patch(&mut doc, patch, later);

        assert_eq!(doc[CREATED_AT_FIELD], timestamp(created));
        assert_eq!(doc[UPDATED_AT_FIELD], timestamp(later));
        assert_eq!(doc["title"], json!("Demo"));
        assert_eq!(doc[CREATED_AT_FIELD], json!("2024-01-01T00:00:00.000000Z"));
    }
}
