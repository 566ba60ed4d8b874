// Host environment abstraction
//
// The engine never talks to a browser directly. Everything the visibility
// bridge needs from the page is expressed by the `Host` and `RenderSurface`
// traits below, with a simulated implementation for tests and headless runs
// and a `web-sys` implementation for the browser.

pub use simulated::{HostSignal, SimulatedHost, SimulatedSurface};
#[cfg(target_arch = "wasm32")]
pub use web::{WebHost, WebSurface};

mod simulated;
#[cfg(target_arch = "wasm32")]
mod web;

/// Type tag used by app-shell hosts to signal that the app went to the background
pub const PAUSE_EVENT: &str = "pause";

/// A notification delivered by the host to one of our listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEvent {
    pub event_type: String,
}

impl HostEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
        }
    }
}

/// Callback invoked by the host's own dispatch loop
pub type Listener = Box<dyn Fn(&HostEvent)>;

/// Options for additive listeners
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// A passive listener never cancels the host's default action
    pub passive: bool,
}

/// Which visibility API variant the host exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityApi {
    Standard,
    Webkit,
    Moz,
    Ms,
}

impl VisibilityApi {
    /// Variants in the order they are probed
    pub const PROBE_ORDER: [VisibilityApi; 4] = [
        VisibilityApi::Standard,
        VisibilityApi::Webkit,
        VisibilityApi::Moz,
        VisibilityApi::Ms,
    ];

    /// Name of the document property reporting hidden state
    pub const fn hidden_property(self) -> &'static str {
        match self {
            VisibilityApi::Standard => "hidden",
            VisibilityApi::Webkit => "webkitHidden",
            VisibilityApi::Moz => "mozHidden",
            VisibilityApi::Ms => "msHidden",
        }
    }

    /// Name of the document event fired when hidden state changes
    pub const fn change_event(self) -> &'static str {
        match self {
            VisibilityApi::Standard => "visibilitychange",
            VisibilityApi::Webkit => "webkitvisibilitychange",
            VisibilityApi::Moz => "mozvisibilitychange",
            VisibilityApi::Ms => "msvisibilitychange",
        }
    }

    pub fn is_vendor_prefixed(self) -> bool {
        self != VisibilityApi::Standard
    }
}

/// Document and window level primitives of the embedding page
///
/// Every method must degrade silently when the underlying API is missing.
pub trait Host {
    /// Read a boolean document property, `None` when the property does not exist
    fn hidden_property(&self, name: &str) -> Option<bool>;

    /// Attach an additive document level listener for `event`
    fn add_document_listener(&self, event: &str, listener: Listener);

    /// Install the window blur handler, replacing any previous one
    fn set_window_blur(&self, listener: Listener);

    /// Install the window focus handler, replacing any previous one
    fn set_window_focus(&self, listener: Listener);

    /// Whether the window can be focused programmatically
    fn supports_focus(&self) -> bool;

    fn focus(&self);
}

/// The drawable area owned by the engine
pub trait RenderSurface {
    /// Attach an additive pointer-down listener
    fn add_pointer_down_listener(&self, listener: Listener, options: ListenerOptions);

    /// Install the mouse-leave handler, replacing any previous one
    fn set_mouse_out(&self, listener: Listener);

    /// Install the mouse-enter handler, replacing any previous one
    fn set_mouse_over(&self, listener: Listener);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(VisibilityApi::Standard, "hidden", "visibilitychange")]
    #[case(VisibilityApi::Webkit, "webkitHidden", "webkitvisibilitychange")]
    #[case(VisibilityApi::Moz, "mozHidden", "mozvisibilitychange")]
    #[case(VisibilityApi::Ms, "msHidden", "msvisibilitychange")]
    fn test_api_names(#[case] api: VisibilityApi, #[case] property: &str, #[case] event: &str) {
        assert_eq!(api.hidden_property(), property);
        assert_eq!(api.change_event(), event);
    }

    #[test]
    fn test_standard_probed_first() {
        assert_eq!(VisibilityApi::PROBE_ORDER[0], VisibilityApi::Standard);
        assert!(!VisibilityApi::Standard.is_vendor_prefixed());
        assert!(VisibilityApi::PROBE_ORDER[1..]
            .iter()
            .all(|api| api.is_vendor_prefixed()));
    }
}
