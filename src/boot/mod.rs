// Game boot sequence
//
// The game handle and the handler bridging host visibility, focus and
// mouse-boundary signals onto the game's event bus.

pub use game::Game;
pub use visibility::{visibility_event, VisibilityHandler, VisibilityReport, VisibilitySource};

mod game;
mod visibility;
