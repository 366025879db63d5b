//! JSON ingestion implementation.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single object: `{"a":1}`
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! Records are flat: nested objects and arrays are kept as their JSON text.

use std::fs;
use std::path::Path;

use crate::error::{SourceError, SourceResult};
use crate::types::{Dataset, Record, Value};

/// Ingest JSON from a file into a [`Dataset`].
pub fn ingest_json_from_path(path: impl AsRef<Path>) -> SourceResult<Dataset> {
    let text = fs::read_to_string(path)?;
    ingest_json_from_str(&text)
}

/// Ingest JSON from an in-memory string into a [`Dataset`].
///
/// Empty (or whitespace-only) input yields an empty dataset.
pub fn ingest_json_from_str(input: &str) -> SourceResult<Dataset> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Dataset::default());
    }

    // First try parsing as a single JSON value (array or object).
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Array(items)) => ingest_json_values(&items),
        Ok(v @ serde_json::Value::Object(_)) => ingest_json_values(std::slice::from_ref(&v)),
        Ok(_) => Err(SourceError::InvalidShape {
            message: "json must be an object, an array of objects, or NDJSON".to_string(),
        }),
        Err(first_err) => {
            // Fall back to NDJSON; a single line that fails is reported as the document parse error.
            if !trimmed.contains('\n') {
                return Err(first_err.into());
            }
            let mut values = Vec::new();
            for line in trimmed.lines() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                values.push(serde_json::from_str::<serde_json::Value>(line)?);
            }
            ingest_json_values(&values)
        }
    }
}

/// Convert already-parsed JSON values into a [`Dataset`].
///
/// Every value must be an object.
pub fn ingest_json_values(values: &[serde_json::Value]) -> SourceResult<Dataset> {
    let mut records = Vec::with_capacity(values.len());
    for (idx0, v) in values.iter().enumerate() {
        let obj = v.as_object().ok_or_else(|| SourceError::InvalidShape {
            message: format!("row {} is not a json object", idx0 + 1),
        })?;
        records.push(record_from_object(obj));
    }
    Ok(Dataset::new(records))
}

/// Convert a JSON object into a [`Record`], keeping key order.
pub fn record_from_object(obj: &serde_json::Map<String, serde_json::Value>) -> Record {
    obj.iter()
        .map(|(k, v)| (k.as_str(), convert_json_value(v)))
        .collect()
}

fn convert_json_value(v: &serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
        serde_json::Value::String(s) => Value::Str(s.clone()),
        nested => Value::Str(nested.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::ingest_json_from_str;
    use crate::error::SourceError;
    use crate::types::Value;

    #[test]
    fn array_of_objects() {
        let ds = ingest_json_from_str(r#"[{"a":1,"b":"x"},{"a":2.5,"b":null}]"#).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].get("a"), Some(&Value::Number(1.0)));
        assert_eq!(ds.records[1].get("b"), Some(&Value::Null));
    }

    #[test]
    fn nested_values_are_kept_as_json_text() {
        let ds = ingest_json_from_str(r#"{"tags":["a","b"],"meta":{"k":1}}"#).unwrap();
        assert_eq!(ds.records[0].get("tags"), Some(&Value::from(r#"["a","b"]"#)));
        assert_eq!(ds.records[0].get("meta"), Some(&Value::from(r#"{"k":1}"#)));
    }

    #[test]
    fn ndjson_lines() {
        let ds = ingest_json_from_str("{\"a\":1}\n\n{\"a\":2}\n").unwrap();
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn empty_input_is_empty_dataset() {
        assert!(ingest_json_from_str("  \n").unwrap().is_empty());
        assert!(ingest_json_from_str("[]").unwrap().is_empty());
    }

    #[test]
    fn non_object_rows_are_rejected() {
        let err = ingest_json_from_str("[1, 2]").unwrap_err();
        assert!(matches!(err, SourceError::InvalidShape { .. }));
        assert!(err.to_string().contains("row 1 is not a json object"));

        let err = ingest_json_from_str("42").unwrap_err();
        assert!(matches!(err, SourceError::InvalidShape { .. }));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = ingest_json_from_str("[{\"a\":").unwrap_err();
        assert!(matches!(err, SourceError::Json(_)));
    }
}
