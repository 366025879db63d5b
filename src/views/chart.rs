//! Reshaping of processed records into a labelled chart series.

use serde::Serialize;

use crate::processing::{find_aggregatable_column, label_for};
use crate::types::{Dataset, GroupKeySet, Record, coerce_number};

/// Column holding the sums of grouped records, and the fallback measure when the first record
/// has no aggregatable column.
pub const DEFAULT_MEASURE: &str = "value";

/// A single labelled series, ready for a category-axis chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Legend label of the series.
    pub label: String,
    /// Column the values were read from.
    pub measure: String,
    /// One axis label per record.
    pub labels: Vec<String>,
    /// One value per record; non-numeric values are plotted as `0`.
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// Build a series from `records`.
    ///
    /// With `group_keys` set, the measure is the aggregated `"value"` column whenever the first
    /// record has one, so a numeric group column is never plotted in place of the sums.
    /// Otherwise it is the aggregatable column of the first record, or `"value"` if there is
    /// none. The series label is `title` if given, otherwise the detected measure, otherwise
    /// `"Value"`.
    pub fn build(
        records: &Dataset,
        x_label_key: Option<&str>,
        group_keys: &GroupKeySet,
        title: Option<&str>,
    ) -> Self {
        let detected = match records.first() {
            Some(first) if !group_keys.is_empty() && first.contains(DEFAULT_MEASURE) => Some(DEFAULT_MEASURE),
            Some(first) => find_aggregatable_column(first),
            None => None,
        };
        let measure = detected.unwrap_or(DEFAULT_MEASURE).to_string();

        let label = match (title, detected) {
            (Some(t), _) if !t.is_empty() => t.to_string(),
            (_, Some(m)) => m.to_string(),
            _ => "Value".to_string(),
        };

        let labels = records
            .iter()
            .map(|r| label_for(r, x_label_key, group_keys))
            .collect();
        let values = records
            .iter()
            .map(|r| {
                let n = coerce_number(r.get(&measure));
                if n.is_nan() { 0.0 } else { n }
            })
            .collect();

        Self {
            label,
            measure,
            labels,
            values,
        }
    }

    /// Number of points in the series.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series has no points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One point of a bubble chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BubblePoint {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Radius.
    pub r: f64,
}

/// Default bubble radius when `r` is missing, zero or not a number.
pub const DEFAULT_BUBBLE_RADIUS: f64 = 5.0;

/// Read `x`, `y` and `r` columns from each record.
///
/// Missing or non-numeric coordinates become `0`; a missing, zero or non-numeric radius becomes
/// [`DEFAULT_BUBBLE_RADIUS`].
pub fn bubble_points(records: &Dataset) -> Vec<BubblePoint> {
    records
        .iter()
        .map(|r| BubblePoint {
            x: or_default(r, "x", 0.0),
            y: or_default(r, "y", 0.0),
            r: or_default(r, "r", DEFAULT_BUBBLE_RADIUS),
        })
        .collect()
}

fn or_default(record: &Record, column: &str, default: f64) -> f64 {
    let n = coerce_number(record.get(column));
    if n.is_nan() || n == 0.0 { default } else { n }
}

#[cfg(test)]
mod tests {
    use super::{BubblePoint, ChartSeries, bubble_points};
    use crate::types::{Dataset, GroupKeySet, Record, Value};

    fn rec(pairs: &[(&str, Value)]) -> Record {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn series_from_grouped_records_uses_label_and_value() {
        let ds = Dataset::new(vec![
            rec(&[("category", "A".into()), ("label", "A".into()), ("value", 15.into())]),
            rec(&[("category", "B".into()), ("label", "B".into()), ("value", 3.into())]),
        ]);
        let keys: GroupKeySet = ["category"].into_iter().collect();

        let s = ChartSeries::build(&ds, None, &keys, None);

        assert_eq!(s.label, "value");
        assert_eq!(s.labels, vec!["A", "B"]);
        assert_eq!(s.values, vec![15.0, 3.0]);
    }

    #[test]
    fn numeric_group_column_does_not_replace_the_sums() {
        let raw = Dataset::new(vec![
            rec(&[("sales", 10.into()), ("quarter", 1.into())]),
            rec(&[("sales", 5.into()), ("quarter", 1.into())]),
            rec(&[("sales", 3.into()), ("quarter", 2.into())]),
        ]);
        let keys: GroupKeySet = ["quarter"].into_iter().collect();
        let grouped = crate::processing::group_and_aggregate(&raw, &keys);
        assert_eq!(grouped.columns(), vec!["quarter", "label", "value"]);

        let s = ChartSeries::build(&grouped, None, &keys, None);

        assert_eq!(s.measure, "value");
        assert_eq!(s.labels, vec!["1", "2"]);
        assert_eq!(s.values, vec![15.0, 3.0]);
    }

    #[test]
    fn series_falls_back_to_value_column_and_zero() {
        let ds = Dataset::new(vec![
            rec(&[("id", 1.into()), ("value", "12".into())]),
            rec(&[("id", 2.into()), ("value", "n/a".into())]),
            rec(&[("id", 3.into())]),
        ]);

        let s = ChartSeries::build(&ds, Some("id"), &GroupKeySet::new(), Some("Sales"));

        assert_eq!(s.label, "Sales");
        assert_eq!(s.measure, "value");
        assert_eq!(s.labels, vec!["1", "2", "3"]);
        assert_eq!(s.values, vec![12.0, 0.0, 0.0]);
    }

    #[test]
    fn series_on_empty_dataset_is_empty() {
        let s = ChartSeries::build(&Dataset::default(), None, &GroupKeySet::new(), None);
        assert!(s.is_empty());
        assert_eq!(s.label, "Value");
    }

    #[test]
    fn bubble_points_apply_defaults() {
        let ds = Dataset::new(vec![
            rec(&[("x", 1.into()), ("y", "2".into()), ("r", 0.into())]),
            rec(&[("x", "bad".into()), ("r", 7.into())]),
        ]);
        assert_eq!(
            bubble_points(&ds),
            vec![
                BubblePoint { x: 1.0, y: 2.0, r: 5.0 },
                BubblePoint { x: 0.0, y: 0.0, r: 7.0 },
            ]
        );
    }
}
