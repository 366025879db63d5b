//! Dashboard configuration.

use serde::Deserialize;

use crate::views::ChartKind;

/// Settings that shape how processed records are presented.
///
/// Every field is optional when deserializing; missing fields take their [`Default`] value.
///
/// ```rust
/// use dashboard_pipeline::config::DashboardConfig;
/// use dashboard_pipeline::views::ChartKind;
///
/// let cfg = DashboardConfig::from_json_str(r#"{"xLabelKey":"month","defaultChart":"line"}"#).unwrap();
/// assert_eq!(cfg.x_label_key.as_deref(), Some("month"));
/// assert_eq!(cfg.default_chart, ChartKind::Line);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Column whose value labels the chart's category axis, when present and truthy.
    pub x_label_key: Option<String>,
    /// Column label for the value axis.
    pub y_label_key: Option<String>,
    /// Chart kind shown first.
    pub default_chart: ChartKind,
}

impl DashboardConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// `x_label_key`, treating an empty string as unset.
    pub fn x_label_key(&self) -> Option<&str> {
        self.x_label_key.as_deref().filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardConfig;
    use crate::views::ChartKind;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = DashboardConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.default_chart, ChartKind::Bar);
    }

    #[test]
    fn empty_x_label_key_is_unset() {
        let cfg = DashboardConfig::from_json_str(r#"{"xLabelKey":""}"#).unwrap();
        assert_eq!(cfg.x_label_key(), None);
    }

    #[test]
    fn unknown_chart_kind_is_rejected() {
        assert!(DashboardConfig::from_json_str(r#"{"defaultChart":"area"}"#).is_err());
    }
}
