//! In-process event bus
//!
//! Replaces the browser-wide `study-session-completed` event. Delivery is
//! fire-and-forget and at most once: publishing with no subscribers is not an
//! error, and a subscriber that falls behind loses the oldest events.

use tokio::sync::broadcast;

use crate::storage::StudySession;

pub const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum StudyEvent {
    /// The focus timer finished and the session was recorded
    SessionCompleted(StudySession),
    /// A study plan was generated
    PlanGenerated { id: String },
    ResourcesCreated { topic: String },
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<StudyEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Returns how many subscribers will see the event
    pub fn publish(&self, event: StudyEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StudyEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
