use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use super::{
    bus::EventBus,
    events::Emitted,
    handler::{EventError, EventHandler},
};

/// Forwards events from the bus to downstream handlers
///
/// This is where multi-listener fan-out happens. The host bridge emits each
/// event exactly once; the dispatcher delivers it to every handler that
/// wants it.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
    receiver: broadcast::Receiver<Emitted>,
    handler_timeout: Duration,
}

impl EventDispatcher {
    /// Create a new dispatcher, subscribed to `event_bus` immediately
    ///
    /// Events emitted after this call are delivered once `start_listening`
    /// runs, up to the bus capacity.
    pub fn new(event_bus: &EventBus) -> Self {
        Self {
            handlers: Vec::new(),
            receiver: event_bus.subscribe(),
            handler_timeout: Duration::from_secs(5),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        info!(handler_name = handler.name(), "Registering event handler");
        self.handlers.push(handler);
    }

    /// Set the timeout for individual handler execution
    pub fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = timeout;
        self
    }

    /// Spawn the dispatch loop
    ///
    /// The task ends once every bus handle has been dropped.
    pub fn start_listening(self) -> JoinHandle<()> {
        let Self {
            handlers,
            mut receiver,
            handler_timeout,
        } = self;

        info!(
            handler_count = handlers.len(),
            timeout_ms = handler_timeout.as_millis() as u64,
            "Starting event dispatcher"
        );

        tokio::spawn(async move {
            loop {
                let emitted = match receiver.recv().await {
                    Ok(emitted) => emitted,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Event dispatcher lagged behind the bus");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                debug!(event = %emitted.event, "Dispatching event");

                for handler in handlers.iter().filter(|h| h.wants(emitted.event)) {
                    if let Err(e) = Self::handle_with_timeout(handler, &emitted, handler_timeout).await {
                        error!(
                            handler = handler.name(),
                            event = %emitted.event,
                            error = %e,
                            "Event handler failed"
                        );
                    }
                }
            }

            info!("Event dispatcher stopped listening");
        })
    }

    async fn handle_with_timeout(
        handler: &Arc<dyn EventHandler>,
        emitted: &Emitted,
        handler_timeout: Duration,
    ) -> Result<(), EventError> {
        match timeout(handler_timeout, handler.handle(emitted)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(EventError::Timeout),
        }
    }
}
