//! Data Transfer Objects
//!
//! Response types for the JSON endpoints.

use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "saturated"
    pub status: String,
    /// Dashboard sessions currently connected
    pub active_sessions: usize,
    /// Session limit
    pub max_sessions: usize,
    /// Seconds since the server started
    pub uptime_seconds: u64,
    /// Crate version
    pub version: String,
}
