use async_trait::async_trait;
use thiserror::Error;

use super::events::{Emitted, GameEvent};

/// Errors that can occur when handling bus events
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Handler timed out")]
    Timeout,

    #[error("Handler rejected event: {0}")]
    Rejected(String),
}

impl EventError {
    pub fn rejected(msg: impl Into<String>) -> Self {
        EventError::Rejected(msg.into())
    }
}

/// Trait for downstream systems reacting to engine events
///
/// The bus fans each event out to every interested handler. Handlers run
/// one after another for a given event, in registration order.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handle one emitted event
    async fn handle(&self, event: &Emitted) -> Result<(), EventError>;

    /// Get a human-readable name for this handler (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Whether this handler wants to receive `event` at all
    fn wants(&self, _event: GameEvent) -> bool {
        true
    }
}

/// A handler that logs every event it receives
pub struct LoggingEventHandler;

#[async_trait]
impl EventHandler for LoggingEventHandler {
    async fn handle(&self, event: &Emitted) -> Result<(), EventError> {
        tracing::info!(event = %event.event, args = event.args.len(), "Engine event");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LoggingEventHandler"
    }
}
