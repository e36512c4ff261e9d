//! Dashboard Core
//!
//! The reactive pipeline behind every dashboard session:
//!
//! - [`generator`]: produces one simulated reading per tick
//! - [`history`]: bounded FIFO of recent readings; notifies subscribers on change
//! - [`view_model`]: pure projections (`latest`, `series`) of a history snapshot
//! - [`types`]: `Reading` and `Snapshot`
//! - [`error`]: pipeline errors

pub mod error;
pub mod generator;
pub mod history;
pub mod types;
pub mod view_model;

pub use error::{DashboardError, DashboardResult};
pub use generator::{round_to, ReadingGenerator, TemperatureGenerator};
pub use history::{HistoryBuffer, NotifyReport, Subscriber, SubscriptionId};
pub use types::{Reading, Snapshot, TIMESTAMP_FORMAT};
pub use view_model::ViewModel;
