//! Timestamp panel

use super::html::{escape, placeholder, NO_DATA};
use super::{View, ViewId};
use crate::dashboard::{DashboardError, DashboardResult, ViewModel};

/// Latest reading's timestamp
#[derive(Default)]
pub struct TimestampView;

impl View for TimestampView {
    fn id(&self) -> ViewId {
        ViewId::Timestamp
    }

    fn render(&self, model: &ViewModel) -> DashboardResult<String> {
        match model.latest() {
            Ok(reading) => Ok(format!(
                r#"<div class="big-value">{}</div>"#,
                escape(&reading.formatted_timestamp())
            )),
            Err(DashboardError::EmptyHistory) => Ok(placeholder(NO_DATA)),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Reading, Snapshot};
    use std::sync::Arc;

    #[test]
    fn test_renders_latest_timestamp() {
        let readings = vec![
            Reading::parse(-17.2, "2024-03-01 08:00:01").unwrap(),
            Reading::parse(-16.8, "2024-03-01 08:00:02").unwrap(),
        ];
        let model = ViewModel::new(Snapshot::new(Arc::from(readings), 2));

        let html = TimestampView.render(&model).unwrap();
        assert_eq!(html, r#"<div class="big-value">2024-03-01 08:00:02</div>"#);
    }

    #[test]
    fn test_empty_history_placeholder() {
        let model = ViewModel::new(Snapshot::empty());
        let html = TimestampView.render(&model).unwrap();
        assert!(html.contains("placeholder"));
    }
}
