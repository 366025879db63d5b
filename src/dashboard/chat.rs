//! Question/answer log for the "ask a question" panel.
//!
//! Each question triggers a fresh fetch; the answer carries the fetched records so the panel can
//! show them as a chart and a table.

use std::time::SystemTime;

use crate::types::{Dataset, FilterSet, GroupKeySet};
use crate::views::{ChartSeries, TableView};

use super::source::DataSource;
use super::state::DashboardState;

/// Answer text attached to a successful fetch.
pub const ANSWER_TEXT: &str = "Here's the analysis of your data";

/// One question and its answer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Position-independent id, unique within its [`ChatLog`].
    pub id: u64,
    /// The question as asked, trimmed.
    pub question: String,
    /// Answer text, or the error message if the fetch failed.
    pub answer: String,
    /// Records backing the answer; `None` if the fetch failed.
    pub data: Option<Dataset>,
    /// Collapsed in the panel.
    pub minimized: bool,
    /// When the question was asked.
    pub asked_at: SystemTime,
}

impl ChatMessage {
    /// Chart of the answer's records, titled after the question.
    ///
    /// Axis labels follow `dashboard`'s `x_label_key` and chart grouping; the records
    /// themselves are plotted as fetched.
    pub fn chart_series(&self, dashboard: &DashboardState) -> Option<ChartSeries> {
        let title = format!("Analysis: {}", self.question);
        self.data.as_ref().map(|ds| {
            ChartSeries::build(
                ds,
                dashboard.config().x_label_key(),
                dashboard.graph_group_by(),
                Some(title.as_str()),
            )
        })
    }

    /// Table of the answer's records.
    pub fn table_view(&self) -> Option<TableView> {
        self.data
            .as_ref()
            .map(|ds| TableView::build(ds, &FilterSet::new(), &GroupKeySet::new()))
    }
}

/// Ordered list of [`ChatMessage`]s; only the newest is expanded after a question.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask `question`, answering it from `source`.
    ///
    /// Earlier messages are minimized. Blank questions are ignored and return `None`; otherwise
    /// the new message's id is returned whether or not the fetch succeeded.
    pub fn ask(&mut self, question: &str, source: &dyn DataSource) -> Option<u64> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        for m in &mut self.messages {
            m.minimized = true;
        }

        let id = self.next_id;
        self.next_id += 1;

        let (answer, data) = match source.fetch() {
            Ok(ds) => (ANSWER_TEXT.to_string(), Some(ds)),
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to answer question");
                (e.to_string(), None)
            }
        };

        self.messages.push(ChatMessage {
            id,
            question: question.to_string(),
            answer,
            data,
            minimized: false,
            asked_at: SystemTime::now(),
        });
        Some(id)
    }

    /// Flip the minimized flag of message `id`. Returns `false` if there is no such message.
    pub fn toggle_minimize(&mut self, id: u64) -> bool {
        match self.messages.iter_mut().find(|m| m.id == id) {
            Some(m) => {
                m.minimized = !m.minimized;
                true
            }
            None => false,
        }
    }

    /// Message with id `id`.
    pub fn get(&self, id: u64) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Messages, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if nothing has been asked yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ANSWER_TEXT, ChatLog};
    use crate::config::DashboardConfig;
    use crate::dashboard::source::StaticSource;
    use crate::dashboard::state::{DashboardEvent, DashboardState};
    use crate::types::{Dataset, Record, Value};

    fn source() -> StaticSource {
        let r: Record = [("month", Value::from("Jan")), ("sales", Value::from(4))]
            .into_iter()
            .collect();
        StaticSource::new(Dataset::new(vec![r]))
    }

    #[test]
    fn asking_minimizes_previous_messages() {
        let mut log = ChatLog::new();
        let first = log.ask("sales by month?", &source()).unwrap();
        let second = log.ask("and now?", &source()).unwrap();

        assert!(log.get(first).unwrap().minimized);
        let latest = log.get(second).unwrap();
        assert!(!latest.minimized);
        assert_eq!(latest.answer, ANSWER_TEXT);

        let chart = latest.chart_series(&DashboardState::default()).unwrap();
        assert_eq!(chart.label, "Analysis: and now?");
        assert_eq!(chart.labels, vec!["Item"]);
        assert_eq!(chart.values, vec![4.0]);
        assert_eq!(latest.table_view().unwrap().columns, vec!["month", "sales"]);
    }

    #[test]
    fn chart_labels_follow_the_dashboard_settings() {
        let mut log = ChatLog::new();
        let id = log.ask("sales by month?", &source()).unwrap();
        let m = log.get(id).unwrap();

        let config = DashboardConfig {
            x_label_key: Some("month".to_string()),
            ..Default::default()
        };
        let by_key = m.chart_series(&DashboardState::new(config)).unwrap();
        assert_eq!(by_key.labels, vec!["Jan"]);

        let mut grouped = DashboardState::default();
        grouped.apply(DashboardEvent::SetGraphGroupBy(["month"].into_iter().collect()));
        assert_eq!(m.chart_series(&grouped).unwrap().labels, vec!["Jan"]);
    }

    #[test]
    fn failed_fetch_becomes_the_answer() {
        let mut log = ChatLog::new();
        let id = log.ask("why?", &StaticSource::failing("Failed to fetch data")).unwrap();
        let m = log.get(id).unwrap();
        assert_eq!(m.answer, "fetch failed: Failed to fetch data");
        assert!(m.data.is_none());
        assert!(m.chart_series(&DashboardState::default()).is_none());
    }

    #[test]
    fn blank_questions_are_ignored_and_toggle_flips() {
        let mut log = ChatLog::new();
        assert_eq!(log.ask("   ", &source()), None);
        assert!(log.is_empty());

        let id = log.ask("q", &source()).unwrap();
        assert!(log.toggle_minimize(id));
        assert!(log.get(id).unwrap().minimized);
        assert!(!log.toggle_minimize(id + 100));
    }
}
