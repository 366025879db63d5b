//! CSV ingestion implementation.

use std::path::Path;

use crate::error::SourceResult;
use crate::types::{Dataset, Record, Value};

/// Ingest a CSV file into an in-memory [`Dataset`].
///
/// Rules:
///
/// - CSV must have headers; header order becomes column order.
/// - Each cell's type is inferred independently (see [`infer_value`]).
/// - Short rows leave the trailing columns absent.
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> SourceResult<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> SourceResult<Dataset> {
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(name, raw)| (name, infer_value(raw)))
            .collect();
        records.push(record);
    }

    Ok(Dataset::new(records))
}

/// Infer a [`Value`] from a raw CSV cell.
///
/// - empty / whitespace → [`Value::Null`]
/// - `true` / `false` (any case) → [`Value::Bool`]
/// - finite number → [`Value::Number`]
/// - anything else → [`Value::Str`] (trimmed)
pub fn infer_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::Number(n),
        _ => Value::Str(trimmed.to_owned()),
    }
}
