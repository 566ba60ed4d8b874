// Library crate for the game boot layer
// This file exposes the public API for the binary and integration tests

pub mod boot;
pub mod event;
pub mod host;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use boot::{Game, VisibilityHandler, VisibilityReport};
pub use event::{EventBus, EventDispatcher, GameEvent};
pub use host::{Host, HostEvent, RenderSurface, SimulatedHost, SimulatedSurface, VisibilityApi};
pub use shared::{ConfigError, GameConfig};
