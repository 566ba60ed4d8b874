use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Named events published on the engine's event bus
///
/// The string token of each variant is its identifier in lowercase. Tokens
/// are used as stable identifiers when listeners register by name, so they
/// must never change once published.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumCount,
    EnumString,
    Display,
    IntoStaticStr,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameEvent {
    // Lifecycle events
    /// The host document is ready
    Ready,
    /// The game finished booting but is not yet running
    Boot,
    /// Dispatched before the main step, ahead of any scene update
    PreStep,
    /// Dispatched after pre-step and before the scenes step
    Step,
    /// Dispatched after the scenes have updated
    PostStep,
    /// Dispatched right before the scenes render
    PreRender,
    /// Dispatched at the very end of the render pass
    PostRender,
    /// The game loop entered a paused state
    Pause,
    /// The game loop left a paused state
    Resume,
    Resize,
    Destroy,

    // Host visibility events
    /// The embedding document became hidden
    Hidden,
    /// The embedding document became visible
    Visible,
    /// The embedding window lost focus
    Blur,
    /// The embedding window gained focus
    Focus,
    /// The pointer left the rendering surface
    MouseOut,
    /// The pointer entered the rendering surface
    MouseOver,
}

impl GameEvent {
    /// The wire token for this event
    pub const fn as_str(self) -> &'static str {
        match self {
            GameEvent::Ready => "ready",
            GameEvent::Boot => "boot",
            GameEvent::PreStep => "prestep",
            GameEvent::Step => "step",
            GameEvent::PostStep => "poststep",
            GameEvent::PreRender => "prerender",
            GameEvent::PostRender => "postrender",
            GameEvent::Pause => "pause",
            GameEvent::Resume => "resume",
            GameEvent::Resize => "resize",
            GameEvent::Destroy => "destroy",
            GameEvent::Hidden => "hidden",
            GameEvent::Visible => "visible",
            GameEvent::Blur => "blur",
            GameEvent::Focus => "focus",
            GameEvent::MouseOut => "mouseout",
            GameEvent::MouseOver => "mouseover",
        }
    }

    /// Whether this event originates from the host visibility bridge
    pub fn is_visibility_event(self) -> bool {
        matches!(
            self,
            GameEvent::Hidden
                | GameEvent::Visible
                | GameEvent::Blur
                | GameEvent::Focus
                | GameEvent::MouseOut
                | GameEvent::MouseOver
        )
    }
}

/// A single message carried by the event bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emitted {
    pub event: GameEvent,
    /// Positional arguments, empty for events that carry no payload
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<serde_json::Value>,
}

impl Emitted {
    pub fn new(event: GameEvent) -> Self {
        Self {
            event,
            args: Vec::new(),
        }
    }

    pub fn with_args(event: GameEvent, args: Vec<serde_json::Value>) -> Self {
        Self { event, args }
    }
}
