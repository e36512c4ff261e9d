//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::config::Config;
use crate::session::SessionRegistry;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only configuration every session is built from
    pub config: Arc<Config>,
    /// Active dashboard sessions
    pub sessions: Arc<SessionRegistry>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let sessions = SessionRegistry::new(config.server.max_sessions);
        Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get active session count
    pub async fn session_count(&self) -> usize {
        self.sessions.session_count().await
    }
}
