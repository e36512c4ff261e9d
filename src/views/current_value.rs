//! Current-value panel

use super::html::{escape, format_value, placeholder, NO_DATA};
use super::{View, ViewId};
use crate::dashboard::{DashboardError, DashboardResult, ViewModel};

/// Latest reading's value with its unit
pub struct CurrentValueView {
    unit: String,
    decimals: u32,
}

impl CurrentValueView {
    pub fn new(unit: impl Into<String>, decimals: u32) -> Self {
        Self {
            unit: unit.into(),
            decimals,
        }
    }
}

impl View for CurrentValueView {
    fn id(&self) -> ViewId {
        ViewId::CurrentValue
    }

    fn render(&self, model: &ViewModel) -> DashboardResult<String> {
        let reading = match model.latest() {
            Ok(reading) => reading,
            Err(DashboardError::EmptyHistory) => return Ok(placeholder(NO_DATA)),
            Err(e) => return Err(e),
        };

        let mut text = format_value(reading.value(), self.decimals);
        if !self.unit.is_empty() {
            text.push(' ');
            text.push_str(&self.unit);
        }

        Ok(format!(r#"<div class="big-value">{}</div>"#, escape(&text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Reading, Snapshot};
    use std::sync::Arc;

    fn model(readings: Vec<Reading>) -> ViewModel {
        let version = readings.len() as u64;
        ViewModel::new(Snapshot::new(Arc::from(readings), version))
    }

    #[test]
    fn test_renders_latest_with_unit() {
        let view = CurrentValueView::new("C", 1);
        let html = view
            .render(&model(vec![
                Reading::parse(-16.8, "2024-03-01 08:00:01").unwrap(),
                Reading::parse(-17.0, "2024-03-01 08:00:02").unwrap(),
            ]))
            .unwrap();

        assert_eq!(html, r#"<div class="big-value">-17.0 C</div>"#);
    }

    #[test]
    fn test_empty_history_placeholder() {
        let view = CurrentValueView::new("C", 1);
        let html = view.render(&model(Vec::new())).unwrap();
        assert!(html.contains(NO_DATA));
    }

    #[test]
    fn test_unit_is_escaped() {
        let view = CurrentValueView::new("<C>", 1);
        let html = view
            .render(&model(vec![Reading::parse(-17.2, "2024-03-01 08:00:01").unwrap()]))
            .unwrap();
        assert!(html.contains("-17.2 &lt;C&gt;"));
    }
}
