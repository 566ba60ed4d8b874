use tokio::sync::broadcast;
use tracing::debug;

use super::events::{Emitted, GameEvent};

const DEFAULT_CAPACITY: usize = 256;

/// Event bus shared by every system of a game instance
///
/// Cloning the bus yields another handle onto the same channel. Emitting
/// never blocks; slow subscribers lag instead of stalling the emitter.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Emitted>,
}

impl EventBus {
    /// Creates a new event bus holding up to `capacity` undelivered events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Emits an event with no arguments
    pub fn emit(&self, event: GameEvent) {
        self.send(Emitted::new(event));
    }

    /// Emits an event with positional arguments
    pub fn emit_with(&self, event: GameEvent, args: Vec<serde_json::Value>) {
        self.send(Emitted::with_args(event, args));
    }

    fn send(&self, emitted: Emitted) {
        let event = emitted.event;
        match self.sender.send(emitted) {
            Ok(receivers) => {
                debug!(event = %event, receivers, "Event emitted");
            }
            Err(_) => {
                debug!(event = %event, "Event emitted with no receivers");
            }
        }
    }

    /// Subscribe to every event emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<Emitted> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emit_reaches_every_subscriber() {
        let bus = EventBus::with_default_capacity();
        let mut first = bus.subscribe();
        let mut second = bus.clone().subscribe();

        bus.emit(GameEvent::Blur);

        assert_eq!(first.try_recv().unwrap(), Emitted::new(GameEvent::Blur));
        assert_eq!(second.try_recv().unwrap(), Emitted::new(GameEvent::Blur));
        assert!(first.try_recv().is_err());
    }

    #[test]
    fn test_emit_without_subscribers_is_silent() {
        let bus = EventBus::new(4);
        assert_eq!(bus.receiver_count(), 0);
        bus.emit(GameEvent::Hidden);
    }

    #[test]
    fn test_emit_with_arguments() {
        let bus = EventBus::new(4);
        let mut receiver = bus.subscribe();

        bus.emit_with(GameEvent::Resize, vec![json!(1024), json!(768)]);

        let received = receiver.try_recv().unwrap();
        assert_eq!(received.event, GameEvent::Resize);
        assert_eq!(received.args, vec![json!(1024), json!(768)]);
    }

    #[test]
    fn test_subscriber_only_sees_later_events() {
        let bus = EventBus::new(4);
        let _keepalive = bus.subscribe();
        bus.emit(GameEvent::Boot);

        let mut late = bus.subscribe();
        bus.emit(GameEvent::Ready);

        assert_eq!(late.try_recv().unwrap().event, GameEvent::Ready);
        assert!(late.try_recv().is_err());
    }
}
