//! The record transformation pipeline.
//!
//! Every derived view of a dataset is computed by the same three steps:
//!
//! - [`filter()`]: case-insensitive substring filtering per column
//! - [`group_and_aggregate()`]: partition by group columns and sum one measure column
//! - [`label_for()`]: pick an axis label for each resulting record
//!
//! All functions are pure: inputs are never mutated, and the same inputs always yield the same
//! output, so callers can memoize on `(dataset, filters, group keys)`.
//!
//! ## Example: filter → group
//!
//! ```rust
//! use dashboard_pipeline::processing::{label_for, process};
//! use dashboard_pipeline::types::{Dataset, FilterSet, GroupKeySet, Record, Value};
//!
//! let rec = |c: &str, v: i32| -> Record {
//!     [("category", Value::from(c)), ("value", Value::from(v))].into_iter().collect()
//! };
//! let ds = Dataset::new(vec![rec("A", 10), rec("A", 5), rec("B", 3)]);
//!
//! let keys: GroupKeySet = ["category"].into_iter().collect();
//! let out = process(&ds, &FilterSet::new(), &keys);
//!
//! assert_eq!(out.len(), 2);
//! assert_eq!(out.records[0].get("value"), Some(&Value::Number(15.0)));
//! assert_eq!(label_for(&out.records[1], None, &keys), "B");
//! ```

pub mod aggregate;
pub mod filter;
pub mod label;

pub use aggregate::{GROUP_KEY_SEPARATOR, aggregate, find_aggregatable_column, group_and_aggregate};
pub use filter::{filter, matches};
pub use label::label_for;

use crate::types::{Dataset, FilterSet, GroupKeySet};

/// Filter `dataset`, then group and aggregate the survivors.
///
/// This is the whole derived-view recomputation. The table view and the chart view run it with
/// the same filters but independent group keys.
pub fn process(dataset: &Dataset, filters: &FilterSet, group_keys: &GroupKeySet) -> Dataset {
    let filtered = filter(dataset, filters);
    group_and_aggregate(&filtered, group_keys)
}
