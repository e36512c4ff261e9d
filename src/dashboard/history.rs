//! History Buffer
//!
//! Bounded FIFO of the most recent readings, and the observable subject of
//! the dashboard. Every append bumps the version and synchronously notifies
//! each subscriber with a `ViewModel` of the post-append state.

use std::collections::VecDeque;
use std::sync::Arc;

use super::error::DashboardResult;
use super::types::{Reading, Snapshot};
use super::view_model::ViewModel;

/// Reacts to history changes
pub trait Subscriber: Send {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Called after every change with a model of the new state
    fn on_change(&mut self, model: &ViewModel) -> DashboardResult<()>;

    /// Forget any output cached from earlier notifications
    fn invalidate(&mut self) {}
}

/// Handle returned by [`HistoryBuffer::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Outcome of one notification round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Bounded, insertion-ordered store of readings
pub struct HistoryBuffer {
    readings: VecDeque<Reading>,
    capacity: usize,
    version: u64,
    subscribers: Vec<(SubscriptionId, Box<dyn Subscriber>)>,
    next_subscription: u64,
}

impl HistoryBuffer {
    /// Create an empty buffer holding at most `capacity` readings (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            readings: VecDeque::new(),
            capacity,
            version: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Append a reading, evicting the oldest beyond capacity, then notify
    pub fn append(&mut self, reading: Reading) -> NotifyReport {
        self.readings.push_back(reading);
        if self.readings.len() > self.capacity {
            self.readings.pop_front();
        }
        self.version += 1;

        self.notify()
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> Snapshot {
        let readings: Vec<Reading> = self.readings.iter().cloned().collect();
        Snapshot::new(Arc::from(readings), self.version)
    }

    /// Register a subscriber; it is not notified until the next change or
    /// explicit [`notify`](Self::notify)
    pub fn subscribe(&mut self, subscriber: Box<dyn Subscriber>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;

        tracing::trace!(subscriber = subscriber.name(), "Subscribed to history");
        self.subscribers.push((id, subscriber));
        id
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Deliver the current state to every subscriber
    ///
    /// A failing subscriber is logged and skipped; the rest are still notified.
    pub fn notify(&mut self) -> NotifyReport {
        let model = ViewModel::new(self.snapshot());
        let mut report = NotifyReport::default();

        for (_, subscriber) in self.subscribers.iter_mut() {
            match subscriber.on_change(&model) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        subscriber = subscriber.name(),
                        version = model.version(),
                        error = %e,
                        "Subscriber failed to handle history change"
                    );
                }
            }
        }

        report
    }

    /// Invalidate every subscriber, then deliver the current state
    pub fn resync(&mut self) -> NotifyReport {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber.invalidate();
        }
        self.notify()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of appends so far; changes on every mutation
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
