//! Dashboard page
//!
//! The static shell the views render into. Every view element starts with the
//! empty-state placeholder; the session's first notification replaces it.

use super::html::{placeholder, NO_DATA};
use crate::config::DashboardConfig;

const TEMPLATE: &str = include_str!("page.html");

/// Delay before the page script reconnects a dropped socket
const RECONNECT_MS: u64 = 2000;

/// Render the full page for the given dashboard settings
pub fn render_page(config: &DashboardConfig) -> String {
    TEMPLATE
        .replace("{{placeholder}}", &placeholder(NO_DATA))
        .replace("{{history_size}}", &config.history_size.to_string())
        .replace("{{reconnect_ms}}", &RECONNECT_MS.to_string())
}
