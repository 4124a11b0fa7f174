//! Broadcast fan-out for round lifecycle events.

use tokio::sync::broadcast;

use crate::dto::sse::ServerEvent;

/// Broadcast hub the SSE route subscribes to.
///
/// Interested parties subscribe explicitly; nothing holds callback
/// references, so an abandoned subscriber is simply dropped.
pub struct EventHub {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventHub {
    /// Construct a hub backed by a Tokio broadcast channel with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a new subscriber that will receive subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    /// Send an event to all current subscribers, ignoring delivery errors.
    pub fn broadcast(&self, event: ServerEvent) {
        let _ = self.sender.send(event);
    }
}
