//! Dashboard error types
//!
//! Errors raised along the tick → history → view pipeline. None of them are
//! fatal: each one is caught at the stage that raised it and logged.

use thiserror::Error;

/// Errors that can occur while producing, storing or rendering readings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// `latest()` was asked for before the first reading arrived
    #[error("No readings recorded yet")]
    EmptyHistory,

    /// The generator could not produce a reading; the tick is skipped
    #[error("Generator failure: {0}")]
    GeneratorFailure(String),

    /// A single view failed to render
    #[error("Render failure in view '{view}': {reason}")]
    RenderFailure { view: String, reason: String },

    /// The session's outbound channel is gone
    #[error("Session closed")]
    SessionClosed,
}

impl DashboardError {
    /// Build a render failure for the named view
    pub fn render(view: impl Into<String>, reason: impl Into<String>) -> Self {
        DashboardError::RenderFailure {
            view: view.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
