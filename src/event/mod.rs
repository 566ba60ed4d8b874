// Engine event infrastructure
//
// The registry of named events, the bus every system publishes on, and the
// dispatcher that fans bus traffic out to downstream handlers.

// Public API - what other modules can use
pub use bus::EventBus;
pub use dispatcher::EventDispatcher;
pub use events::{Emitted, GameEvent};
pub use handler::{EventError, EventHandler, LoggingEventHandler};

// Internal modules
mod bus;
mod dispatcher;
mod events;
mod handler;
