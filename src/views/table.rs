//! Table view
//!
//! One row per reading, oldest first, columns `temp` then `timestamp`.

use super::html::{escape, format_value, placeholder, NO_DATA};
use super::{View, ViewId};
use crate::dashboard::{DashboardResult, ViewModel};

pub struct TableView {
    decimals: u32,
}

impl TableView {
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }
}

impl View for TableView {
    fn id(&self) -> ViewId {
        ViewId::Table
    }

    fn render(&self, model: &ViewModel) -> DashboardResult<String> {
        let series = model.series();
        if series.is_empty() {
            return Ok(placeholder(NO_DATA));
        }

        let mut html = String::from(
            r#"<table class="readings"><thead><tr><th>temp</th><th>timestamp</th></tr></thead><tbody>"#,
        );
        for reading in series {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>",
                format_value(reading.value(), self.decimals),
                escape(&reading.formatted_timestamp())
            ));
        }
        html.push_str("</tbody></table>");

        Ok(html)
    }
}
