//! Payload-shape decoding for record collections.
//!
//! Upstream services disagree on envelope shape: some return a bare JSON
//! array of records, others wrap the array in an object under a primary
//! collection key. Both shapes decode to the same `Vec<RawRecord>`.

use crate::error::{Result, SourceError};
use call_domain::RawRecord;
use serde_json::Value;

/// Wrapper-object keys checked, in order, for the primary record array.
const COLLECTION_KEYS: [&str; 4] = ["records", "items", "data", "results"];

/// Decode a JSON payload into records.
///
/// Accepts a bare array or a wrapper object exposing a primary array field.
/// Non-object elements inside the array are skipped rather than failing the
/// whole batch.
pub fn records_from_value(payload: Value) -> Result<Vec<RawRecord>> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let key = COLLECTION_KEYS
                .iter()
                .find(|key| matches!(map.get(**key), Some(Value::Array(_))))
                .ok_or_else(|| {
                    SourceError::UnexpectedShape(format!(
                        "object payload has no array field among {COLLECTION_KEYS:?}"
                    ))
                })?;
            match map.remove(*key) {
                Some(Value::Array(items)) => items,
                _ => unreachable!("key checked above"),
            }
        }
        other => {
            return Err(SourceError::UnexpectedShape(format!(
                "expected array or object, got {other}"
            )));
        }
    };

    let total = items.len();
    let records: Vec<RawRecord> = items.into_iter().filter_map(RawRecord::from_value).collect();
    if records.len() < total {
        tracing::debug!(
            skipped = total - records.len(),
            "dropped non-object elements from record payload"
        );
    }
    Ok(records)
}
