//! Loading records from files.
//!
//! [`ingest_from_path`] picks the format from the file extension (or takes an explicit
//! [`IngestionFormat`]) and loads the file into an in-memory [`crate::types::Dataset`].
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]

pub mod csv;
pub mod json;
pub mod unified;

pub use unified::{IngestionFormat, ingest_from_path};
