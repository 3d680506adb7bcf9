//! Event bus for actboard using tokio::broadcast
//!
//! The store publishes load lifecycle and view changes; the TUI subscribes
//! for redraw triggers.

use crate::models::Month;
use tokio::sync::broadcast;

/// Events emitted by the dashboard store
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// A fetch for `month` was started
    LoadStarted { month: Month, generation: u64 },
    /// The dataset for `month` was applied
    DatasetLoaded { month: Month, generation: u64 },
    /// The latest fetch failed; the previous dataset is kept
    LoadFailed { month: Month, message: String },
    /// A fetch completed after a newer one was requested and was dropped
    LoadSuperseded { month: Month, generation: u64 },
    /// Day or search selection changed
    ViewChanged,
}

/// Event bus for broadcasting dashboard events
pub struct EventBus {
    sender: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    /// Create a new event bus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create with default capacity (256 events)
    pub fn default_capacity() -> Self {
        Self::new(256)
    }

    pub fn publish(&self, event: DashboardEvent) {
        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::default_capacity()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
