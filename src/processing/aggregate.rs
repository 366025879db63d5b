//! Grouping and aggregation for [`crate::types::Dataset`].
//!
//! Grouping partitions records by a composite key built from the [`GroupKeySet`] columns and
//! sums a single measure column per partition. The measure is the first "aggregatable" column of
//! the first record (see [`find_aggregatable_column`]); if there is none, grouping is skipped and
//! the input is returned unchanged.

use std::collections::HashMap;

use crate::types::{AggregatedRecord, Dataset, GroupKeySet, Record, join_component};

/// Separator placed between group values in a composite key.
pub const GROUP_KEY_SEPARATOR: &str = " | ";

/// Columns that identify records rather than measure them.
const IDENTIFIER_COLUMNS: [&str; 2] = ["id", "year"];

/// Returns the first column of `sample` holding a finite number, skipping identifier columns.
///
/// Columns named `id` or `year` (case-insensitive) are never returned. Only `sample` is
/// inspected: a dataset whose later records carry a numeric column the first one lacks is not
/// detected.
pub fn find_aggregatable_column(sample: &Record) -> Option<&str> {
    sample
        .iter()
        .find(|(column, value)| value.as_finite_number().is_some() && !is_identifier(column))
        .map(|(column, _)| column)
}

fn is_identifier(column: &str) -> bool {
    IDENTIFIER_COLUMNS
        .iter()
        .any(|id| column.eq_ignore_ascii_case(id))
}

/// Builds the composite key of `record` for `keys`, joined by `separator`.
///
/// Null and absent values contribute an empty component.
pub(crate) fn composite_key(record: &Record, keys: &GroupKeySet, separator: &str) -> String {
    keys.iter()
        .map(|k| join_component(record.get(k)))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Partition `dataset` by `group_keys` and sum the aggregatable column per partition.
///
/// Returns `None` when grouping does not apply: no keys, no records, or no aggregatable column
/// on the first record. Partitions are returned in the order their key was first seen.
pub fn aggregate(dataset: &Dataset, group_keys: &GroupKeySet) -> Option<Vec<AggregatedRecord>> {
    if group_keys.is_empty() {
        return None;
    }
    let measure = find_aggregatable_column(dataset.first()?)?;

    let mut groups: Vec<AggregatedRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in dataset {
        let key = composite_key(record, group_keys, GROUP_KEY_SEPARATOR);
        let slot = match index.get(&key) {
            Some(&i) => i,
            None => {
                let group_values = group_keys
                    .iter()
                    .filter_map(|k| record.get(k).map(|v| (k, v.clone())))
                    .collect();
                groups.push(AggregatedRecord {
                    group_values,
                    label: key.clone(),
                    value: 0.0,
                    count: 0,
                });
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };

        let group = &mut groups[slot];
        group.value += record
            .get(measure)
            .and_then(|v| v.as_finite_number())
            .unwrap_or(0.0);
        group.count += 1;
    }

    Some(groups)
}

/// Group and aggregate `dataset` by `group_keys`.
///
/// - Empty `group_keys`: the input is returned unchanged.
/// - No aggregatable column on the first record: a warning is logged and the input is returned
///   unchanged.
/// - Otherwise: one record per partition, carrying the group columns, `label` (the composite
///   key) and `value` (the summed measure).
pub fn group_and_aggregate(dataset: &Dataset, group_keys: &GroupKeySet) -> Dataset {
    if group_keys.is_empty() || dataset.is_empty() {
        return dataset.clone();
    }
    match aggregate(dataset, group_keys) {
        Some(groups) => groups.into_iter().map(AggregatedRecord::into_record).collect(),
        None => {
            tracing::warn!(
                keys = ?group_keys.as_slice(),
                "cannot group: no numeric column found for aggregation"
            );
            dataset.clone()
        }
    }
}
