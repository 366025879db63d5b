//! Path-based loading with the format picked from the file extension.

use std::path::Path;

use crate::error::{SourceError, SourceResult};
use crate::types::Dataset;

use super::{csv, json};

/// File formats a dashboard can load records from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// JSON array-of-objects, single object, or NDJSON.
    Json,
}

impl IngestionFormat {
    /// Format for a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            _ => None,
        }
    }

    /// Format of `path`, read from its extension.
    pub fn from_path(path: &Path) -> SourceResult<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| SourceError::InvalidShape {
                message: format!("cannot infer format: '{}' has no extension", path.display()),
            })?;
        Self::from_extension(ext).ok_or_else(|| SourceError::InvalidShape {
            message: format!("unsupported file extension '{ext}'"),
        })
    }
}

/// Load `path` as `format`, or as the format its extension names when `format` is `None`.
///
/// # Examples
///
/// ```no_run
/// use dashboard_pipeline::ingestion::ingest_from_path;
///
/// # fn main() -> Result<(), dashboard_pipeline::SourceError> {
/// let ds = ingest_from_path("sales.json", None)?;
/// println!("records={}", ds.len());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, format: Option<IngestionFormat>) -> SourceResult<Dataset> {
    let path = path.as_ref();
    let format = match format {
        Some(f) => f,
        None => IngestionFormat::from_path(path)?,
    };
    match format {
        IngestionFormat::Csv => csv::ingest_csv_from_path(path),
        IngestionFormat::Json => json::ingest_json_from_path(path),
    }
}
