//! Registry of chart kinds a chart renderer can draw.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A chart kind offered to the user.
///
/// Horizontal and stacked bars are variants of the plain bar chart; [`ChartKind::base_type`]
/// returns the renderer type to draw them with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    /// Vertical bars.
    #[default]
    Bar,
    /// Line chart.
    Line,
    /// Pie chart.
    Pie,
    /// Doughnut chart.
    Doughnut,
    /// Radar chart.
    Radar,
    /// Polar area chart.
    PolarArea,
    /// Scatter plot.
    Scatter,
    /// Bubble chart; uses `x`/`y`/`r` columns instead of labels and values.
    Bubble,
    /// Bars along the y axis.
    HorizontalBar,
    /// Stacked vertical bars.
    StackedBar,
}

impl ChartKind {
    /// All kinds, in the order they are offered to the user.
    pub const ALL: [ChartKind; 10] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Doughnut,
        ChartKind::Radar,
        ChartKind::PolarArea,
        ChartKind::Scatter,
        ChartKind::Bubble,
        ChartKind::HorizontalBar,
        ChartKind::StackedBar,
    ];

    /// Registry key, e.g. `"horizontalBar"`.
    pub fn key(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Doughnut => "doughnut",
            ChartKind::Radar => "radar",
            ChartKind::PolarArea => "polarArea",
            ChartKind::Scatter => "scatter",
            ChartKind::Bubble => "bubble",
            ChartKind::HorizontalBar => "horizontalBar",
            ChartKind::StackedBar => "stackedBar",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Pie => "Pie Chart",
            ChartKind::Doughnut => "Doughnut Chart",
            ChartKind::Radar => "Radar Chart",
            ChartKind::PolarArea => "Polar Area Chart",
            ChartKind::Scatter => "Scatter Chart",
            ChartKind::Bubble => "Bubble Chart",
            ChartKind::HorizontalBar => "Horizontal Bar",
            ChartKind::StackedBar => "Stacked Bar",
        }
    }

    /// The renderer type used to draw this kind.
    pub fn base_type(self) -> ChartKind {
        match self {
            ChartKind::HorizontalBar | ChartKind::StackedBar => ChartKind::Bar,
            other => other,
        }
    }

    /// Returns `true` if bars are stacked on both axes.
    pub fn is_stacked(self) -> bool {
        self == ChartKind::StackedBar
    }

    /// Returns `true` if the index axis is `y`.
    pub fn is_horizontal(self) -> bool {
        self == ChartKind::HorizontalBar
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a string is not a registry key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown chart kind '{0}'")]
pub struct UnknownChartKind(pub String);

impl FromStr for ChartKind {
    type Err = UnknownChartKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|k| k.key() == s)
            .ok_or_else(|| UnknownChartKind(s.to_string()))
    }
}
