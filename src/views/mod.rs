//! Presentation Views
//!
//! Each view turns a [`ViewModel`] into an HTML fragment for one element of
//! the page. Views are independent: a session subscribes each one to its
//! history separately, so one view failing or being slow to change never
//! affects the others.
//!
//! - [`CurrentValueView`]: latest value with unit
//! - [`TimestampView`]: latest timestamp
//! - [`TableView`]: the whole history as rows
//! - [`ChartView`]: the whole history as an SVG line chart

pub mod chart;
pub mod current_value;
pub mod html;
pub mod page;
pub mod table;
pub mod timestamp;

pub use chart::ChartView;
pub use current_value::CurrentValueView;
pub use page::render_page;
pub use table::TableView;
pub use timestamp::TimestampView;

use serde::{Deserialize, Serialize};

use crate::config::SensorConfig;
use crate::dashboard::{DashboardResult, ViewModel};

/// Identifies a view; doubles as the id of its element on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    CurrentValue,
    Timestamp,
    Table,
    Chart,
}

impl ViewId {
    pub fn all() -> &'static [ViewId] {
        &[
            ViewId::CurrentValue,
            ViewId::Timestamp,
            ViewId::Table,
            ViewId::Chart,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::CurrentValue => "current_value",
            ViewId::Timestamp => "timestamp",
            ViewId::Table => "table",
            ViewId::Chart => "chart",
        }
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A renderable widget
pub trait View: Send {
    fn id(&self) -> ViewId;

    /// Render the fragment for the given state
    ///
    /// Must not fail on an empty or single-reading history.
    fn render(&self, model: &ViewModel) -> DashboardResult<String>;
}

/// The four dashboard views, configured for the given sensor
pub fn default_views(sensor: &SensorConfig) -> Vec<Box<dyn View>> {
    vec![
        Box::new(CurrentValueView::new(sensor.unit.clone(), sensor.decimals)),
        Box::new(TimestampView),
        Box::new(TableView::new(sensor.decimals)),
        Box::new(ChartView::new(sensor.decimals)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Snapshot;

    #[test]
    fn test_view_id_serialization_matches_as_str() {
        for id in ViewId::all() {
            let json = serde_json::to_string(id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn test_default_views_cover_all_ids() {
        let views = default_views(&SensorConfig::default());
        let ids: Vec<ViewId> = views.iter().map(|v| v.id()).collect();
        assert_eq!(ids, ViewId::all());
    }

    #[test]
    fn test_all_views_tolerate_empty_history() {
        let model = ViewModel::new(Snapshot::empty());
        for view in default_views(&SensorConfig::default()) {
            let fragment = view.render(&model).unwrap();
            assert!(fragment.contains(html::NO_DATA), "{} had no placeholder", view.id());
        }
    }
}
