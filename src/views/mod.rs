//! Consumer-facing reshaping of processed records.
//!
//! - [`TableView`]: display columns and rows, with a `_count` column when grouped
//! - [`ChartSeries`]: axis labels and values for a category chart
//! - [`ChartKind`]: the chart kinds a renderer can be asked to draw

pub mod chart;
pub mod kind;
pub mod table;

pub use chart::{BubblePoint, ChartSeries, bubble_points};
pub use kind::{ChartKind, UnknownChartKind};
pub use table::{COUNT_COLUMN, TableView};
