//! Core data model types.
//!
//! Records arriving from a dashboard data source are flat, schema-less JSON objects. This module
//! models them as an ordered [`Record`] of [`Value`]s, collected into a [`Dataset`]. It also holds
//! the inputs of the transformation pipeline ([`FilterSet`], [`GroupKeySet`]) and its grouped
//! output ([`AggregatedRecord`]).
//!
//! A column missing from a record is *absent*, which is distinct from an explicit
//! [`Value::Null`]. The coercion helpers ([`stringify`], [`join_component`], [`coerce_number`],
//! [`is_truthy`]) take `Option<&Value>` so that absence can be represented.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// A single scalar value in a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit null.
    Null,
    /// Any number. Integers and floats share one representation.
    Number(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Str(String),
}

impl Value {
    /// Returns the number if this is a finite [`Value::Number`].
    pub fn as_finite_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Formats a number the way a browser renders it when converting to a string.
///
/// Integral values have no fractional part (`10.0` → `"10"`), very large or very small
/// magnitudes use exponent notation with an explicit sign (`1e+21`, `1e-7`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // Covers -0.0 as well.
        return "0".to_string();
    }
    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let s = format!("{n:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }
    format!("{n}")
}

/// String form of a possibly-absent value: absent becomes `"undefined"`, null becomes `"null"`.
pub fn stringify(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(v) => v.to_string(),
    }
}

/// String form used when joining values into a composite key.
///
/// Same as [`stringify`], except null and absent values contribute an empty string.
pub fn join_component(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(v) => v.to_string(),
    }
}

/// Numeric form of a possibly-absent value.
///
/// Absent and unparseable strings become `NaN`; null and blank strings become `0`;
/// booleans become `1`/`0`.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => *n,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Str(s)) => parse_numeric_str(s),
    }
}

fn parse_numeric_str(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(n) = parse_radix_literal(trimmed) {
        return n;
    }
    // Rust accepts "inf"/"nan" spellings that a browser would reject.
    if trimmed.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// `0x`/`0o`/`0b` literals (unsigned). A prefix with no valid digits is `NaN`.
fn parse_radix_literal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let n = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(n.unwrap_or(f64::NAN))
}

/// Truthiness of a possibly-absent value.
///
/// Absent, null, `false`, `0`, `NaN` and `""` are falsy; everything else is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => *n != 0.0 && !n.is_nan(),
        Some(Value::Str(s)) => !s.is_empty(),
    }
}

/// One row of source data: an ordered mapping from column name to [`Value`].
///
/// Column order is insertion order. Inserting an existing column replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `column`, or `None` if the column is absent.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, v)| v)
    }

    /// Returns `true` if `column` is present (including when it holds null).
    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Set `column` to `value`, keeping the column's original position if it already exists.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Iterate column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate `(column, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, v)| (name.as_str(), v))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Ordered sequence of [`Record`]s, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    /// Records in arrival order.
    pub records: Vec<Record>,
}

impl Dataset {
    /// Create a dataset from records.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Number of records in the dataset.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first record, used as the schema sample.
    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// Iterate records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Column names of the first record, or an empty list for an empty dataset.
    pub fn columns(&self) -> Vec<String> {
        self.first()
            .map(|r| r.columns().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Create a new dataset containing only records that match `predicate`.
    pub fn filter_records<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Record) -> bool,
    {
        let records = self
            .records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect();
        Self { records }
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Per-column free-text filters.
///
/// A column mapped to `None` or to an empty string imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    entries: BTreeMap<String, Option<String>>,
}

impl FilterSet {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the needle for `column`. `None` clears the constraint but keeps the entry.
    pub fn set(&mut self, column: impl Into<String>, needle: Option<String>) {
        self.entries.insert(column.into(), needle);
    }

    /// Remove `column` from the set.
    pub fn remove(&mut self, column: &str) {
        self.entries.remove(column);
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Needle for `column`, if one is set and non-empty.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries
            .get(column)
            .and_then(|n| n.as_deref())
            .filter(|n| !n.is_empty())
    }

    /// Iterate the entries that actually constrain records.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(col, needle)| match needle {
            Some(n) if !n.is_empty() => Some((col.as_str(), n.as_str())),
            _ => None,
        })
    }

    /// Returns `true` if no entry constrains records.
    pub fn is_unconstrained(&self) -> bool {
        self.active().next().is_none()
    }
}

impl<K, V> FromIterator<(K, V)> for FilterSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for (k, v) in iter {
            set.set(k, Some(v.into()));
        }
        set
    }
}

/// Ordered set of column names used to partition a [`Dataset`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupKeySet {
    keys: Vec<String>,
}

impl GroupKeySet {
    /// Create an empty key set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `column` unless it is already present.
    pub fn insert(&mut self, column: impl Into<String>) {
        let column = column.into();
        if !self.keys.contains(&column) {
            self.keys.push(column);
        }
    }

    /// Remove `column` if present.
    pub fn remove(&mut self, column: &str) {
        self.keys.retain(|k| k != column);
    }

    /// Insert or remove `column`, mirroring a checkbox.
    pub fn toggle(&mut self, column: impl Into<String>, enabled: bool) {
        let column = column.into();
        if enabled {
            self.insert(column);
        } else {
            self.remove(&column);
        }
    }

    /// Returns `true` if `column` is selected.
    pub fn contains(&self, column: &str) -> bool {
        self.keys.iter().any(|k| k == column)
    }

    /// Keys in selection order.
    pub fn as_slice(&self) -> &[String] {
        &self.keys
    }

    /// Iterate keys in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no key is selected.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Into<String>> FromIterator<K> for GroupKeySet {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = GroupKeySet::new();
        for k in iter {
            set.insert(k);
        }
        set
    }
}

/// Summary of one partition produced by grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRecord {
    /// Grouping column values, taken from the first record of the partition.
    ///
    /// Columns absent from that record are absent here too.
    pub group_values: Record,
    /// Composite group key.
    pub label: String,
    /// Sum of the aggregatable column across the partition.
    pub value: f64,
    /// Number of records in the partition.
    pub count: usize,
}

impl AggregatedRecord {
    /// Mean of the aggregatable column across the partition.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.value / self.count as f64
        }
    }

    /// Convert into a plain [`Record`]: group columns, then `label`, then `value`.
    ///
    /// A group column literally named `label` or `value` is overwritten in place.
    pub fn into_record(self) -> Record {
        let mut record = self.group_values;
        record.insert("label", self.label);
        record.insert("value", self.value);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_format_like_a_browser() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(10.5), "10.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn stringify_distinguishes_absent_from_null() {
        assert_eq!(stringify(None), "undefined");
        assert_eq!(stringify(Some(&Value::Null)), "null");
        assert_eq!(stringify(Some(&Value::Bool(true))), "true");
        assert_eq!(join_component(None), "");
        assert_eq!(join_component(Some(&Value::Null)), "");
        assert_eq!(join_component(Some(&Value::Number(3.0))), "3");
    }

    #[test]
    fn coerce_number_follows_browser_rules() {
        assert!(coerce_number(None).is_nan());
        assert_eq!(coerce_number(Some(&Value::Null)), 0.0);
        assert_eq!(coerce_number(Some(&Value::Bool(true))), 1.0);
        assert_eq!(coerce_number(Some(&Value::from(" 12.5 "))), 12.5);
        assert_eq!(coerce_number(Some(&Value::from(""))), 0.0);
        assert!(coerce_number(Some(&Value::from("abc"))).is_nan());
        assert!(coerce_number(Some(&Value::from("inf"))).is_nan());
    }

    #[test]
    fn coerce_number_reads_radix_literals() {
        assert_eq!(coerce_number(Some(&Value::from("0x1A"))), 26.0);
        assert_eq!(coerce_number(Some(&Value::from(" 0o17 "))), 15.0);
        assert_eq!(coerce_number(Some(&Value::from("0B101"))), 5.0);
        assert!(coerce_number(Some(&Value::from("0x"))).is_nan());
        assert!(coerce_number(Some(&Value::from("0b102"))).is_nan());
        assert!(coerce_number(Some(&Value::from("-0x1A"))).is_nan());
        assert_eq!(coerce_number(Some(&Value::from("1e400"))), f64::INFINITY);
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&Value::Null)));
        assert!(!is_truthy(Some(&Value::Number(0.0))));
        assert!(!is_truthy(Some(&Value::Number(f64::NAN))));
        assert!(!is_truthy(Some(&Value::from(""))));
        assert!(is_truthy(Some(&Value::from("x"))));
        assert!(is_truthy(Some(&Value::Number(-1.0))));
    }

    #[test]
    fn record_insert_replaces_in_place() {
        let mut r: Record = [("a", Value::from(1)), ("b", Value::from(2))]
            .into_iter()
            .collect();
        r.insert("a", "x");
        assert_eq!(r.columns().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(r.get("a"), Some(&Value::from("x")));
        assert!(!r.contains("c"));
    }

    #[test]
    fn filter_set_ignores_empty_needles() {
        let mut f = FilterSet::new();
        f.set("a", Some(String::new()));
        f.set("b", None);
        assert!(f.is_unconstrained());
        f.set("c", Some("x".to_string()));
        assert_eq!(f.active().collect::<Vec<_>>(), vec![("c", "x")]);
        assert_eq!(f.get("a"), None);
    }

    #[test]
    fn group_key_set_deduplicates_and_toggles() {
        let mut g: GroupKeySet = ["region", "region", "category"].into_iter().collect();
        assert_eq!(g.as_slice(), ["region", "category"]);
        g.toggle("region", false);
        g.toggle("year", true);
        assert_eq!(g.as_slice(), ["category", "year"]);
    }

    #[test]
    fn aggregated_record_into_record_orders_columns() {
        let agg = AggregatedRecord {
            group_values: [("category", "A")].into_iter().collect(),
            label: "A".to_string(),
            value: 15.0,
            count: 2,
        };
        assert_eq!(agg.average(), 7.5);
        let r = agg.into_record();
        assert_eq!(r.columns().collect::<Vec<_>>(), vec!["category", "label", "value"]);
        assert_eq!(r.get("value"), Some(&Value::Number(15.0)));
    }

    #[test]
    fn record_serializes_in_column_order() {
        let r: Record = [("b", Value::from(1)), ("a", Value::Null)].into_iter().collect();
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"b":1.0,"a":null}"#);
    }
}
