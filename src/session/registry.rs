//! Session Registry
//!
//! Tracks the dashboard sessions currently connected. Sessions share nothing
//! else: each one owns its own history, generator and scheduler.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Unique identifier for a dashboard session
pub type SessionId = String;

/// Book-keeping for one connected session
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub connected_at: DateTime<Utc>,
}

/// Registry of active sessions
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SessionInfo>>,
    max_sessions: usize,
}

impl SessionRegistry {
    /// Create a registry allowing at most `max_sessions` concurrent sessions
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
        }
    }

    /// Register a new session
    ///
    /// Returns the session ID on success, or an error if the session limit
    /// has been reached.
    pub async fn register(&self) -> Result<SessionId, RegistryError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            return Err(RegistryError::TooManySessions {
                limit: self.max_sessions,
            });
        }

        let id = Uuid::new_v4().to_string();
        sessions.insert(
            id.clone(),
            SessionInfo {
                connected_at: Utc::now(),
            },
        );

        tracing::info!(session_id = %id, active = sessions.len(), "Dashboard session started");
        Ok(id)
    }

    /// Register a new session whose slot is released when the returned guard
    /// is released or dropped
    pub async fn acquire(self: &Arc<Self>) -> Result<SessionGuard, RegistryError> {
        let id = self.register().await?;
        Ok(SessionGuard {
            registry: Arc::clone(self),
            id,
            released: false,
        })
    }

    /// Remove a session. Returns false if it was not registered.
    pub async fn unregister(&self, id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.remove(id) {
            Some(info) => {
                let duration = Utc::now() - info.connected_at;
                tracing::info!(
                    session_id = %id,
                    duration_secs = duration.num_seconds(),
                    active = sessions.len(),
                    "Dashboard session ended"
                );
                true
            }
            None => false,
        }
    }

    /// Get the current session count
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether a new session would be rejected
    pub async fn is_full(&self) -> bool {
        self.session_count().await >= self.max_sessions
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }
}

/// A registered session's slot in the registry
///
/// Dropping the guard without calling [`SessionGuard::release`] (for example
/// while a session task unwinds from a panic) still frees the slot, from a
/// task spawned on the current runtime.
pub struct SessionGuard {
    registry: Arc<SessionRegistry>,
    id: SessionId,
    released: bool,
}

impl SessionGuard {
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Free the slot now
    pub async fn release(mut self) {
        self.released = true;
        self.registry.unregister(&self.id).await;
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let registry = Arc::clone(&self.registry);
        let id = std::mem::take(&mut self.id);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    registry.unregister(&id).await;
                });
            }
            Err(_) => {
                tracing::warn!(session_id = %id, "No runtime to release session slot");
            }
        }
    }
}

/// Errors that can occur in the session registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Too many sessions (limit: {limit})")]
    TooManySessions { limit: usize },
}
