//! Application state around the transformation pipeline.
//!
//! - [`DataSource`]: where records come from
//! - [`DashboardState`]: raw records, filters and groupings, and the views derived from them
//! - [`ChatLog`]: the question/answer panel

pub mod chat;
pub mod source;
pub mod state;

pub use chat::{ChatLog, ChatMessage};
pub use source::{DataSource, FileSource, StaticSource};
pub use state::{DashboardEvent, DashboardState, LoadStatus};
