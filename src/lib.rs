//! # Antarctic Explorer
//!
//! A live-updating dashboard of simulated temperature readings. Each browser
//! connection gets its own session: a scheduler ticks once per interval, a
//! generator takes a reading, a bounded history keeps the most recent ones,
//! and four independent views (current value, timestamp, table, chart)
//! re-render from the new state and are pushed to the page over WebSocket.
//!
//! ## Modules
//!
//! - [`dashboard`]: readings, generator, history buffer and view model
//! - [`views`]: HTML renderers for each widget and the page shell
//! - [`scheduler`]: fixed-period tick source
//! - [`session`]: per-connection sessions over WebSocket
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use antarctic_explorer::dashboard::*;
//!
//! let mut history = HistoryBuffer::new(5);
//! let mut generator = TemperatureGenerator::new(-18.0, -16.0, 1);
//!
//! for _ in 0..7 {
//!     history.append(generator.generate().unwrap());
//! }
//!
//! let model = ViewModel::new(history.snapshot());
//! assert_eq!(model.series().len(), 5);
//! assert!(model.latest().is_ok());
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod scheduler;
pub mod session;
pub mod views;

// Re-export top-level types for convenience
pub use dashboard::{
    DashboardError, DashboardResult, HistoryBuffer, NotifyReport, Reading, ReadingGenerator,
    Snapshot, Subscriber, TemperatureGenerator, ViewModel,
};

pub use views::{ChartView, CurrentValueView, TableView, TimestampView, View, ViewId};

pub use scheduler::Scheduler;

pub use session::{
    ClientMessage, LiveSession, RegistryError, ServerMessage, SessionId, SessionRegistry,
    websocket_handler,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    Config, ConfigError, DashboardConfig, LoggingConfig, SensorConfig, ServerConfig,
};
