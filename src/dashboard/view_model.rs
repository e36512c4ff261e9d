//! Derived View Model
//!
//! Pure projections over a history snapshot. A fresh `ViewModel` is built for
//! every notification and every projection is recomputed from scratch; the
//! window is small enough that incremental bookkeeping would buy nothing.

use super::error::{DashboardError, DashboardResult};
use super::types::{Reading, Snapshot};

/// What the presentation views read from
#[derive(Debug, Clone)]
pub struct ViewModel {
    snapshot: Snapshot,
}

impl ViewModel {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Most recent reading, or `EmptyHistory` before the first tick
    pub fn latest(&self) -> DashboardResult<&Reading> {
        self.snapshot
            .readings()
            .last()
            .ok_or(DashboardError::EmptyHistory)
    }

    /// All readings, oldest first
    pub fn series(&self) -> &[Reading] {
        self.snapshot.readings()
    }

    /// History version this model was derived from
    pub fn version(&self) -> u64 {
        self.snapshot.version()
    }
}
