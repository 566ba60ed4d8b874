use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::game::Game;
use crate::event::GameEvent;
use crate::host::{Host, HostEvent, ListenerOptions, VisibilityApi, PAUSE_EVENT};

/// The visibility API variant found on the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilitySource {
    api: VisibilityApi,
}

impl VisibilitySource {
    /// Probe the host for a visibility API, standard first, then vendor prefixes
    pub fn probe(host: &dyn Host) -> Option<Self> {
        VisibilityApi::PROBE_ORDER
            .into_iter()
            .find(|api| host.hidden_property(api.hidden_property()).is_some())
            .map(|api| Self { api })
    }

    pub fn api(&self) -> VisibilityApi {
        self.api
    }

    /// Document event to listen on for hidden state changes
    pub fn change_event(&self) -> &'static str {
        self.api.change_event()
    }

    /// Hidden state, read through whichever property variant is active
    ///
    /// A property that disappeared after probing reads as visible.
    pub fn is_hidden(&self, host: &dyn Host) -> bool {
        host.hidden_property(self.api.hidden_property())
            .unwrap_or(false)
    }
}

/// Map a visibility notification onto the engine event to emit
///
/// The pause type tag forces `hidden`; it never turns a hidden document
/// into `visible`.
pub fn visibility_event(hidden: bool, event_type: &str) -> GameEvent {
    if hidden || event_type == PAUSE_EVENT {
        GameEvent::Hidden
    } else {
        GameEvent::Visible
    }
}

/// What the visibility handler managed to wire up on this host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibilityReport {
    /// Active visibility API, `None` when hidden/visible events are unavailable
    pub api: Option<VisibilityApi>,
    /// Focus was requested during setup
    pub focus_requested: bool,
    /// A pointer-down listener re-requests focus on the surface
    pub focus_on_press: bool,
    /// Mouse-boundary handlers are installed on the surface
    pub mouse_tracking: bool,
}

/// Bridges host visibility, focus and mouse-boundary signals onto the game's event bus
pub struct VisibilityHandler;

impl VisibilityHandler {
    /// Wire the host signals of `game` to its event bus
    ///
    /// Runs once per game. Calling it again attaches nothing and returns the
    /// report of the first installation. Missing host APIs only disable the
    /// matching events.
    #[instrument(skip(game), fields(game_id = %game.id()))]
    pub fn install(game: &mut Game) -> VisibilityReport {
        if let Some(report) = game.visibility() {
            warn!("Visibility handler already installed, keeping existing listeners");
            return report;
        }

        let host = Rc::clone(game.host());
        let canvas = game.canvas().cloned();
        let bus = game.events().clone();

        let source = VisibilitySource::probe(host.as_ref());
        match source {
            Some(source) => {
                let weak_host = Rc::downgrade(&host);
                let change_bus = bus.clone();
                host.add_document_listener(
                    source.change_event(),
                    Box::new(move |event: &HostEvent| {
                        let hidden = weak_host
                            .upgrade()
                            .map_or(false, |host| source.is_hidden(host.as_ref()));
                        let emitted = visibility_event(hidden, &event.event_type);
                        debug!(event_type = %event.event_type, hidden, emitted = %emitted, "Visibility change");
                        change_bus.emit(emitted);
                    }),
                );
                info!(api = ?source.api(), "Visibility change detection enabled");
            }
            None => {
                info!("No visibility API on host, hidden/visible events disabled");
            }
        }

        let blur_bus = bus.clone();
        host.set_window_blur(Box::new(move |_: &HostEvent| {
            blur_bus.emit(GameEvent::Blur);
        }));

        let focus_bus = bus.clone();
        host.set_window_focus(Box::new(move |_: &HostEvent| {
            focus_bus.emit(GameEvent::Focus);
        }));

        let mut focus_requested = false;
        let mut focus_on_press = false;

        if game.config().auto_focus && host.supports_focus() {
            host.focus();
            focus_requested = true;

            if let Some(canvas) = &canvas {
                let weak_host = Rc::downgrade(&host);
                canvas.add_pointer_down_listener(
                    Box::new(move |_: &HostEvent| {
                        if let Some(host) = weak_host.upgrade() {
                            host.focus();
                        }
                    }),
                    ListenerOptions { passive: true },
                );
                focus_on_press = true;
            }
        }

        let mouse_tracking = match &canvas {
            Some(canvas) => {
                let is_over = game.pointer_over_flag();
                let out_bus = bus.clone();
                canvas.set_mouse_out(Box::new(move |_: &HostEvent| {
                    is_over.set(false);
                    out_bus.emit(GameEvent::MouseOut);
                }));

                let is_over = game.pointer_over_flag();
                let over_bus = bus;
                canvas.set_mouse_over(Box::new(move |_: &HostEvent| {
                    is_over.set(true);
                    over_bus.emit(GameEvent::MouseOver);
                }));
                true
            }
            None => false,
        };

        let report = VisibilityReport {
            api: source.map(|source| source.api()),
            focus_requested,
            focus_on_press,
            mouse_tracking,
        };

        info!(
            api = ?report.api,
            focus_requested,
            focus_on_press,
            mouse_tracking,
            "Visibility handler installed"
        );

        game.set_visibility(report);
        report
    }
}
