//! Session state of a dashboard and its single update channel.

use crate::config::DashboardConfig;
use crate::processing::process;
use crate::types::{Dataset, FilterSet, GroupKeySet};
use crate::views::{ChartSeries, TableView};

use super::source::DataSource;

/// Where the dashboard is in loading its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// A fetch has started and not yet finished.
    Loading,
    /// Records are available (possibly none).
    Ready,
    /// The last fetch failed with this message. The dataset is empty.
    Failed(String),
}

/// An update to [`DashboardState`].
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// Set or clear the filter text of a column.
    SetFilter { column: String, needle: Option<String> },
    /// Drop every filter.
    ClearFilters,
    /// Replace the table grouping.
    SetGroupBy(GroupKeySet),
    /// Add or remove one table grouping column.
    ToggleGroupBy { column: String, enabled: bool },
    /// Replace the chart grouping.
    SetGraphGroupBy(GroupKeySet),
    /// Add or remove one chart grouping column.
    ToggleGraphGroupBy { column: String, enabled: bool },
    /// New records arrived.
    Loaded(Dataset),
    /// Loading failed.
    LoadFailed(String),
}

/// Raw records, user selections, and the two views derived from them.
///
/// The table pipeline uses `filters` + `group_by`; the chart pipeline uses `filters` +
/// `graph_group_by`. Both are recomputed after every event.
#[derive(Debug, Clone)]
pub struct DashboardState {
    config: DashboardConfig,
    status: LoadStatus,
    data: Dataset,
    filters: FilterSet,
    group_by: GroupKeySet,
    graph_group_by: GroupKeySet,
    all_columns: Vec<String>,
    processed: Dataset,
    graph_processed: Dataset,
}

impl DashboardState {
    /// A state with no records yet, waiting for its first load.
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            status: LoadStatus::Loading,
            data: Dataset::default(),
            filters: FilterSet::new(),
            group_by: GroupKeySet::new(),
            graph_group_by: GroupKeySet::new(),
            all_columns: Vec::new(),
            processed: Dataset::default(),
            graph_processed: Dataset::default(),
        }
    }

    /// Apply one update and recompute the derived views.
    pub fn apply(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::SetFilter { column, needle } => self.filters.set(column, needle),
            DashboardEvent::ClearFilters => self.filters.clear(),
            DashboardEvent::SetGroupBy(keys) => self.group_by = keys,
            DashboardEvent::ToggleGroupBy { column, enabled } => self.group_by.toggle(column, enabled),
            DashboardEvent::SetGraphGroupBy(keys) => self.graph_group_by = keys,
            DashboardEvent::ToggleGraphGroupBy { column, enabled } => {
                self.graph_group_by.toggle(column, enabled)
            }
            DashboardEvent::Loaded(data) => {
                self.all_columns = data.columns();
                self.data = data;
                self.status = LoadStatus::Ready;
            }
            DashboardEvent::LoadFailed(message) => {
                self.data = Dataset::default();
                self.all_columns.clear();
                self.status = LoadStatus::Failed(message);
            }
        }
        self.recompute();
    }

    /// Fetch fresh records from `source`.
    ///
    /// A failure is recorded in [`Self::status`] and leaves the dataset empty; it is not
    /// returned to the caller.
    pub fn refetch(&mut self, source: &dyn DataSource) {
        self.status = LoadStatus::Loading;
        match source.fetch() {
            Ok(data) => self.apply(DashboardEvent::Loaded(data)),
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch data");
                self.apply(DashboardEvent::LoadFailed(e.to_string()));
            }
        }
    }

    fn recompute(&mut self) {
        let (processed, graph_processed) = rayon::join(
            || process(&self.data, &self.filters, &self.group_by),
            || process(&self.data, &self.filters, &self.graph_group_by),
        );
        tracing::debug!(
            records = self.data.len(),
            processed = processed.len(),
            graph_processed = graph_processed.len(),
            "recomputed dashboard views"
        );
        self.processed = processed;
        self.graph_processed = graph_processed;
    }

    /// Presentation settings.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Where the last load stands.
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// The error message of the last failed load, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Returns `true` while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Raw records as loaded.
    pub fn data(&self) -> &Dataset {
        &self.data
    }

    /// Active column filters, shared by both pipelines.
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Table grouping columns.
    pub fn group_by(&self) -> &GroupKeySet {
        &self.group_by
    }

    /// Chart grouping columns.
    pub fn graph_group_by(&self) -> &GroupKeySet {
        &self.graph_group_by
    }

    /// Columns of the first loaded record.
    pub fn all_columns(&self) -> &[String] {
        &self.all_columns
    }

    /// Filtered records, aggregated by `group_by` (`label` + summed `value` per group).
    ///
    /// This is not what [`Self::table_view`] shows; the table collapses the raw records itself.
    pub fn processed(&self) -> &Dataset {
        &self.processed
    }

    /// Filtered records, grouped by `graph_group_by`.
    pub fn graph_processed(&self) -> &Dataset {
        &self.graph_processed
    }

    /// Table of the filtered raw records, collapsed by `group_by` with a `_count` column.
    ///
    /// Built from [`Self::data`], not from [`Self::processed`]: grouped rows keep the first
    /// record of each group, so every original column stays visible.
    pub fn table_view(&self) -> TableView {
        TableView::build(&self.data, &self.filters, &self.group_by)
    }

    /// Chart series of the graph pipeline's output.
    pub fn chart_series(&self, title: Option<&str>) -> ChartSeries {
        ChartSeries::build(
            &self.graph_processed,
            self.config.x_label_key(),
            &self.graph_group_by,
            title,
        )
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{DashboardEvent, DashboardState, LoadStatus};
    use crate::dashboard::source::StaticSource;
    use crate::types::{Dataset, GroupKeySet, Record, Value};

    fn rec(category: &str, region: &str, sales: i32) -> Record {
        [
            ("category", Value::from(category)),
            ("region", Value::from(region)),
            ("sales", Value::from(sales)),
        ]
        .into_iter()
        .collect()
    }

    fn loaded() -> DashboardState {
        let mut state = DashboardState::default();
        let source = StaticSource::new(Dataset::new(vec![
            rec("A", "EU", 10),
            rec("A", "US", 5),
            rec("B", "EU", 3),
        ]));
        state.refetch(&source);
        state
    }

    #[test]
    fn starts_loading_then_ready() {
        assert!(DashboardState::default().is_loading());
        let state = loaded();
        assert_eq!(state.status(), &LoadStatus::Ready);
        assert_eq!(state.all_columns(), ["category", "region", "sales"]);
        assert_eq!(state.processed(), state.data());
    }

    #[test]
    fn table_and_graph_groupings_are_independent() {
        let mut state = loaded();
        state.apply(DashboardEvent::ToggleGroupBy {
            column: "category".to_string(),
            enabled: true,
        });
        state.apply(DashboardEvent::SetGraphGroupBy(
            ["region"].into_iter().collect::<GroupKeySet>(),
        ));

        let table_labels: Vec<_> = state.processed().iter().map(|r| r.get("label").cloned()).collect();
        assert_eq!(table_labels, vec![Some(Value::from("A")), Some(Value::from("B"))]);

        let series = state.chart_series(None);
        assert_eq!(series.labels, vec!["EU", "US"]);
        assert_eq!(series.values, vec![13.0, 5.0]);
    }

    #[test]
    fn table_view_collapses_raw_records_not_processed_output() {
        let mut state = loaded();
        state.apply(DashboardEvent::SetGroupBy(["category"].into_iter().collect()));

        let processed = state.processed().columns();
        assert_eq!(processed, vec!["category", "label", "value"]);

        let table = state.table_view();
        assert_eq!(table.columns, vec!["category", "region", "sales", "_count"]);
        assert_eq!(table.cell(0, "sales"), "10");
        assert_eq!(table.cell(0, "_count"), "2");
    }

    #[test]
    fn filters_apply_to_both_pipelines() {
        let mut state = loaded();
        state.apply(DashboardEvent::SetGraphGroupBy(["region"].into_iter().collect()));
        state.apply(DashboardEvent::SetFilter {
            column: "category".to_string(),
            needle: Some("a".to_string()),
        });

        assert_eq!(state.processed().len(), 2);
        assert_eq!(state.chart_series(Some("Sales")).values, vec![10.0, 5.0]);

        state.apply(DashboardEvent::ClearFilters);
        assert_eq!(state.processed().len(), 3);
    }

    #[test]
    fn failed_fetch_clears_data_and_keeps_message() {
        let mut state = loaded();
        state.refetch(&StaticSource::failing("HTTP error! status: 500"));

        assert_eq!(state.error(), Some("fetch failed: HTTP error! status: 500"));
        assert!(state.data().is_empty());
        assert!(state.all_columns().is_empty());
        assert!(state.processed().is_empty());
        assert!(state.table_view().is_empty());
    }
}
