use thiserror::Error;

/// Convenience result type for loading records from a data source.
pub type SourceResult<T> = Result<T, SourceError>;

/// Error type returned when a [`crate::types::Dataset`] cannot be loaded.
///
/// The transformation pipeline itself never fails; this covers ingestion and data sources only.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input parsed, but is not a list of flat records.
    #[error("invalid shape: {message}")]
    InvalidShape { message: String },

    /// A data source reported a failure (e.g. a non-success response from a backend).
    #[error("fetch failed: {message}")]
    Fetch { message: String },
}
