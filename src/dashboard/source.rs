//! Data sources a dashboard loads its records from.

use std::path::{Path, PathBuf};

use crate::error::{SourceError, SourceResult};
use crate::ingestion::{IngestionFormat, ingest_from_path};
use crate::types::Dataset;

/// Something that can produce a fresh [`Dataset`].
///
/// Implementations typically wrap a backend endpoint; transport is up to the implementor.
pub trait DataSource: Send + Sync {
    /// Load the current records.
    fn fetch(&self) -> SourceResult<Dataset>;
}

/// A source that always returns the same records, or the same failure.
#[derive(Debug, Clone)]
pub struct StaticSource {
    outcome: Result<Dataset, String>,
}

impl StaticSource {
    /// A source returning `dataset`.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            outcome: Ok(dataset),
        }
    }

    /// A source whose every fetch fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

impl DataSource for StaticSource {
    fn fetch(&self) -> SourceResult<Dataset> {
        match &self.outcome {
            Ok(ds) => Ok(ds.clone()),
            Err(message) => Err(SourceError::Fetch {
                message: message.clone(),
            }),
        }
    }
}

/// A source that re-reads a JSON or CSV file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: Option<IngestionFormat>,
}

impl FileSource {
    /// Read `path`, with the format inferred from its extension.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format: None,
        }
    }

    /// Read `path` as `format` regardless of its extension.
    pub fn with_format(path: impl AsRef<Path>, format: IngestionFormat) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format: Some(format),
        }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The forced format, or `None` if it is inferred from the extension.
    pub fn format(&self) -> Option<IngestionFormat> {
        self.format
    }
}

impl DataSource for FileSource {
    fn fetch(&self) -> SourceResult<Dataset> {
        let result = ingest_from_path(&self.path, self.format);
        match &result {
            Ok(ds) => tracing::info!(
                path = %self.path.display(),
                records = ds.len(),
                columns = ds.first().map(|r| r.len()).unwrap_or(0),
                "loaded records from file"
            ),
            Err(error) => tracing::warn!(path = %self.path.display(), %error, "failed to load records from file"),
        }
        result
    }
}
