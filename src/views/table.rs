//! Reshaping of records into rows and columns for a tabular renderer.

use std::collections::HashMap;

use serde::Serialize;

use crate::processing::aggregate::composite_key;
use crate::processing::matches;
use crate::types::{Dataset, FilterSet, GroupKeySet, Record, Value};

/// Synthetic column holding the number of records in a group.
pub const COUNT_COLUMN: &str = "_count";

/// Separator used to build the table's group keys.
pub const TABLE_KEY_SEPARATOR: &str = "|";

/// Text shown for null or missing cells.
pub const EMPTY_CELL: &str = "-";

/// Column hidden from the table.
const HIDDEN_COLUMN: &str = "id";

/// Rows and display columns for a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableView {
    /// Columns to display, in order.
    pub columns: Vec<String>,
    /// Rows to display. When grouped, each row is the first record of its group plus
    /// [`COUNT_COLUMN`].
    pub rows: Vec<Record>,
    /// Whether rows were grouped.
    pub grouped: bool,
}

impl TableView {
    /// Build a table from `dataset`.
    ///
    /// Display columns are the first record's columns except `id`. Rows are filtered with
    /// `filters`; with a non-empty `group_by` they are collapsed to one row per group, in
    /// first-seen order, and `_count` is appended to the columns.
    pub fn build(dataset: &Dataset, filters: &FilterSet, group_by: &GroupKeySet) -> Self {
        let Some(first) = dataset.first() else {
            return Self::default();
        };
        let mut columns: Vec<String> = first
            .columns()
            .filter(|c| *c != HIDDEN_COLUMN)
            .map(str::to_string)
            .collect();

        let filtered = dataset.iter().filter(|r| matches(r, filters));

        if group_by.is_empty() {
            return Self {
                columns,
                rows: filtered.cloned().collect(),
                grouped: false,
            };
        }

        let mut rows: Vec<Record> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for record in filtered {
            let key = composite_key(record, group_by, TABLE_KEY_SEPARATOR);
            match index.get(&key) {
                Some(&i) => counts[i] += 1,
                None => {
                    index.insert(key, rows.len());
                    rows.push(record.clone());
                    counts.push(1);
                }
            }
        }
        for (row, count) in rows.iter_mut().zip(counts) {
            row.insert(COUNT_COLUMN, Value::Number(count as f64));
        }

        columns.push(COUNT_COLUMN.to_string());
        Self {
            columns,
            rows,
            grouped: true,
        }
    }

    /// Rendered text of `column` in row `row`; `"-"` for null, missing or out-of-range cells.
    pub fn cell(&self, row: usize, column: &str) -> String {
        match self.rows.get(row).and_then(|r| r.get(column)) {
            None | Some(Value::Null) => EMPTY_CELL.to_string(),
            Some(v) => v.to_string(),
        }
    }

    /// All rows rendered as text, one entry per display column.
    pub fn rendered_rows(&self) -> Vec<Vec<String>> {
        (0..self.rows.len())
            .map(|i| self.columns.iter().map(|c| self.cell(i, c)).collect())
            .collect()
    }

    /// Returns `true` if there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
