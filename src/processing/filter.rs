//! Record filtering for [`crate::types::Dataset`].

use crate::types::{Dataset, FilterSet, Record, stringify};

/// Returns a new [`Dataset`] containing only records that match every active filter.
///
/// A record matches an entry `(column, needle)` when the lower-cased string form of its value
/// contains the lower-cased needle. A record without the column is compared as `"undefined"`.
/// Relative order is preserved and the input is left untouched.
pub fn filter(dataset: &Dataset, filters: &FilterSet) -> Dataset {
    if filters.is_unconstrained() {
        return dataset.clone();
    }
    let needles: Vec<(&str, String)> = filters
        .active()
        .map(|(column, needle)| (column, needle.to_lowercase()))
        .collect();
    dataset.filter_records(|record| matches_all(record, &needles))
}

/// Returns `true` if `record` satisfies every active entry of `filters`.
pub fn matches(record: &Record, filters: &FilterSet) -> bool {
    filters.active().all(|(column, needle)| {
        stringify(record.get(column))
            .to_lowercase()
            .contains(&needle.to_lowercase())
    })
}

fn matches_all(record: &Record, needles: &[(&str, String)]) -> bool {
    needles.iter().all(|(column, needle)| {
        stringify(record.get(column))
            .to_lowercase()
            .contains(needle.as_str())
    })
}
