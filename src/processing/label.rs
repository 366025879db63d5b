//! Axis labels for chart consumers.

use crate::types::{GroupKeySet, Record, is_truthy, stringify};

/// Label used when nothing better is available.
pub const FALLBACK_LABEL: &str = "Item";

/// Separator between group values in a label built from group columns.
pub const LABEL_SEPARATOR: &str = " - ";

/// Returns the axis label for `record`.
///
/// First match wins:
/// 1. a truthy value at `x_label_key`;
/// 2. a truthy `label` column (how grouped records carry their composite key);
/// 3. the values of the `group_keys` columns present in the record, joined by `" - "`;
/// 4. `"Item"`.
pub fn label_for(record: &Record, x_label_key: Option<&str>, group_keys: &GroupKeySet) -> String {
    if let Some(key) = x_label_key.filter(|k| !k.is_empty()) {
        let value = record.get(key);
        if is_truthy(value) {
            return stringify(value);
        }
    }

    let label = record.get("label");
    if is_truthy(label) {
        return stringify(label);
    }

    if !group_keys.is_empty() {
        return group_keys
            .iter()
            .filter(|k| record.contains(k))
            .map(|k| stringify(record.get(k)))
            .collect::<Vec<_>>()
            .join(LABEL_SEPARATOR);
    }

    FALLBACK_LABEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::label_for;
    use crate::types::{GroupKeySet, Record, Value};

    fn rec(pairs: &[(&str, Value)]) -> Record {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn x_label_key_wins_over_label() {
        let r = rec(&[("foo", "x".into()), ("label", "L".into())]);
        assert_eq!(label_for(&r, Some("foo"), &GroupKeySet::new()), "x");
        assert_eq!(label_for(&r, None, &GroupKeySet::new()), "L");
    }

    #[test]
    fn falsy_x_label_value_falls_through() {
        let r = rec(&[("foo", 0.into()), ("label", "L".into())]);
        assert_eq!(label_for(&r, Some("foo"), &GroupKeySet::new()), "L");
        assert_eq!(label_for(&r, Some(""), &GroupKeySet::new()), "L");
    }

    #[test]
    fn group_columns_join_present_values_only() {
        let r = rec(&[("region", "EU".into()), ("year", 2024.into()), ("n", Value::Null)]);
        let keys: GroupKeySet = ["year", "missing", "region", "n"].into_iter().collect();
        assert_eq!(label_for(&r, None, &keys), "2024 - EU - null");
    }

    #[test]
    fn falls_back_to_item() {
        let r = rec(&[("a", 1.into())]);
        assert_eq!(label_for(&r, Some("missing"), &GroupKeySet::new()), "Item");
    }
}
