//! Chart view
//!
//! Line-with-markers SVG of the history. The x axis is categorical (one slot
//! per reading in insertion order, labelled with its time); the y axis spans
//! the values with some padding.

use super::html::{escape, format_value, placeholder, NO_DATA};
use super::{View, ViewId};
use crate::dashboard::{DashboardError, DashboardResult, Reading, ViewModel};

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 50.0;

/// Number of horizontal grid intervals
const Y_DIVISIONS: usize = 4;

const BACKGROUND: &str = "#444";
const GRID: &str = "#666";
const ACCENT: &str = "aqua";
const MARKER_RADIUS: f64 = 5.0;

pub struct ChartView {
    width: f64,
    height: f64,
    decimals: u32,
}

impl ChartView {
    pub fn new(decimals: u32) -> Self {
        Self {
            width: 720.0,
            height: 320.0,
            decimals,
        }
    }

    /// Override the drawing size (viewBox units)
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    fn plot_width(&self) -> f64 {
        self.width - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height(&self) -> f64 {
        self.height - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn x_at(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            MARGIN_LEFT + self.plot_width() / 2.0
        } else {
            MARGIN_LEFT + self.plot_width() * index as f64 / (count - 1) as f64
        }
    }

    fn y_at(&self, value: f64, (y_min, y_max): (f64, f64)) -> f64 {
        MARGIN_TOP + self.plot_height() * (y_max - value) / (y_max - y_min)
    }

    fn draw(&self, series: &[Reading], range: (f64, f64)) -> String {
        let mut svg = format!(
            r#"<svg class="chart" viewBox="0 0 {w} {h}" width="100%" role="img" aria-label="Temperature over time"><rect width="{w}" height="{h}" fill="{bg}"/>"#,
            w = self.width,
            h = self.height,
            bg = BACKGROUND
        );

        // Grid and y labels
        let right = MARGIN_LEFT + self.plot_width();
        for step in 0..=Y_DIVISIONS {
            let value = range.0 + (range.1 - range.0) * step as f64 / Y_DIVISIONS as f64;
            let y = self.y_at(value, range);
            svg.push_str(&format!(
                r#"<line x1="{MARGIN_LEFT:.1}" y1="{y:.1}" x2="{right:.1}" y2="{y:.1}" stroke="{GRID}" stroke-width="1"/><text x="{:.1}" y="{:.1}" fill="{ACCENT}" font-size="12" text-anchor="end">{}</text>"#,
                MARGIN_LEFT - 8.0,
                y + 4.0,
                format_value(value, self.decimals + 1)
            ));
        }

        // X labels
        let baseline = MARGIN_TOP + self.plot_height();
        for (index, reading) in series.iter().enumerate() {
            let x = self.x_at(index, series.len());
            svg.push_str(&format!(
                r#"<text x="{x:.1}" y="{:.1}" fill="{ACCENT}" font-size="12" text-anchor="middle">{}</text>"#,
                baseline + 20.0,
                escape(&reading.formatted_time())
            ));
        }

        // Axis titles
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" fill="{ACCENT}" font-size="13" text-anchor="middle">timestamp</text><text x="14" y="{:.1}" fill="{ACCENT}" font-size="13" text-anchor="middle" transform="rotate(-90 14 {:.1})">temp</text>"#,
            MARGIN_LEFT + self.plot_width() / 2.0,
            self.height - 8.0,
            MARGIN_TOP + self.plot_height() / 2.0,
            MARGIN_TOP + self.plot_height() / 2.0,
        ));

        let points: Vec<(f64, f64)> = series
            .iter()
            .enumerate()
            .map(|(index, reading)| {
                (
                    self.x_at(index, series.len()),
                    self.y_at(reading.value(), range),
                )
            })
            .collect();

        if points.len() > 1 {
            let path: Vec<String> = points
                .iter()
                .map(|(x, y)| format!("{:.1},{:.1}", x, y))
                .collect();
            svg.push_str(&format!(
                r#"<polyline fill="none" stroke="{ACCENT}" stroke-width="2" points="{}"/>"#,
                path.join(" ")
            ));
        }

        for ((x, y), reading) in points.iter().zip(series) {
            svg.push_str(&format!(
                r#"<circle cx="{x:.1}" cy="{y:.1}" r="{MARKER_RADIUS}" fill="{ACCENT}"><title>{} @ {}</title></circle>"#,
                format_value(reading.value(), self.decimals),
                escape(&reading.formatted_timestamp())
            ));
        }

        svg.push_str("</svg>");
        svg
    }
}

impl View for ChartView {
    fn id(&self) -> ViewId {
        ViewId::Chart
    }

    fn render(&self, model: &ViewModel) -> DashboardResult<String> {
        let series = model.series();
        if series.is_empty() {
            return Ok(placeholder(NO_DATA));
        }

        let range = value_range(series)
            .ok_or_else(|| DashboardError::render(self.id().as_str(), "non-finite reading"))?;

        Ok(self.draw(series, range))
    }
}

/// Padded y range of a non-empty series, or `None` if any value is not finite
fn value_range(series: &[Reading]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for reading in series {
        let value = reading.value();
        if !value.is_finite() {
            return None;
        }
        min = min.min(value);
        max = max.max(value);
    }
    if min > max {
        return None;
    }

    let spread = max - min;
    if spread > 0.0 {
        let padding = spread * 0.1;
        Some((min - padding, max + padding))
    } else {
        Some((min - 1.0, max + 1.0))
    }
}
