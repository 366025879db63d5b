//! `dashboard-pipeline` turns a flat record set into the views a data dashboard displays.
//!
//! Records come from a [`dashboard::DataSource`] (a backend, or a JSON/CSV file via
//! [`ingestion`]) as a [`types::Dataset`]. The [`processing`] pipeline derives:
//!
//! - a filtered view ([`processing::filter`]): case-insensitive substring match per column
//! - a grouped view ([`processing::group_and_aggregate`]): one record per group with a `label`
//!   and a summed `value`
//! - axis labels ([`processing::label_for`])
//!
//! [`views`] reshapes those results for a table ([`views::TableView`]) and a chart
//! ([`views::ChartSeries`]); [`dashboard::DashboardState`] keeps the raw records and user
//! selections and recomputes both views on every [`dashboard::DashboardEvent`].
//!
//! ## Value coercions
//!
//! Records are schema-less, so comparisons go through explicit coercions in [`types`]:
//!
//! - a missing column stringifies as `"undefined"`, an explicit null as `"null"`
//! - integral numbers print without a fractional part (`10`, not `10.0`)
//! - composite group keys render null and missing values as empty strings
//!
//! ## Example
//!
//! ```rust
//! use dashboard_pipeline::dashboard::{DashboardEvent, DashboardState, StaticSource};
//! use dashboard_pipeline::ingestion::json::ingest_json_from_str;
//!
//! # fn main() -> Result<(), dashboard_pipeline::SourceError> {
//! let ds = ingest_json_from_str(
//!     r#"[{"category":"A","value":10},{"category":"A","value":5},{"category":"B","value":3}]"#,
//! )?;
//!
//! let mut state = DashboardState::default();
//! state.refetch(&StaticSource::new(ds));
//! state.apply(DashboardEvent::ToggleGraphGroupBy {
//!     column: "category".to_string(),
//!     enabled: true,
//! });
//!
//! let series = state.chart_series(None);
//! assert_eq!(series.labels, vec!["A", "B"]);
//! assert_eq!(series.values, vec![15.0, 3.0]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: records, datasets, filter/group inputs, coercions
//! - [`processing`]: the transformation pipeline
//! - [`views`]: table and chart reshaping, chart kinds
//! - [`ingestion`]: JSON/CSV loading
//! - [`dashboard`]: data sources, session state, question log
//! - [`config`]: dashboard settings
//! - [`error`]: error types used by ingestion and data sources

pub mod config;
pub mod dashboard;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod types;
pub mod views;

pub use error::{SourceError, SourceResult};
