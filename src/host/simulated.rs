use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Host, HostEvent, Listener, ListenerOptions, RenderSurface, VisibilityApi, PAUSE_EVENT};

/// In-process host used by tests and headless runs
///
/// Mirrors a page with at most one visibility API variant. Signals are
/// delivered synchronously to whatever listeners are attached at the time.
pub struct SimulatedHost {
    api: Option<VisibilityApi>,
    hidden: Cell<bool>,
    focus_supported: bool,
    focus_requests: Cell<usize>,
    document_listeners: RefCell<HashMap<String, Vec<Rc<Listener>>>>,
    on_blur: RefCell<Option<Rc<Listener>>>,
    on_focus: RefCell<Option<Rc<Listener>>>,
}

impl SimulatedHost {
    /// A host exposing the standard visibility API and programmatic focus
    pub fn new() -> Self {
        Self::with_api(Some(VisibilityApi::Standard))
    }

    /// A host exposing only `api`, or no visibility API at all
    pub fn with_api(api: Option<VisibilityApi>) -> Self {
        Self {
            api,
            hidden: Cell::new(false),
            focus_supported: true,
            focus_requests: Cell::new(0),
            document_listeners: RefCell::new(HashMap::new()),
            on_blur: RefCell::new(None),
            on_focus: RefCell::new(None),
        }
    }

    pub fn without_focus(mut self) -> Self {
        self.focus_supported = false;
        self
    }

    pub fn api(&self) -> Option<VisibilityApi> {
        self.api
    }

    /// Set the value of whichever hidden property this host exposes
    pub fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
    }

    pub fn focus_requests(&self) -> usize {
        self.focus_requests.get()
    }

    pub fn document_listener_count(&self, event: &str) -> usize {
        self.document_listeners
            .borrow()
            .get(event)
            .map_or(0, Vec::len)
    }

    pub fn total_document_listeners(&self) -> usize {
        self.document_listeners.borrow().values().map(Vec::len).sum()
    }

    pub fn has_window_handlers(&self) -> bool {
        self.on_blur.borrow().is_some() && self.on_focus.borrow().is_some()
    }

    /// Fire the change event of the active visibility API
    pub fn fire_visibility_change(&self) {
        if let Some(api) = self.api {
            self.fire_document_event(api.change_event());
        }
    }

    /// Fire `event` on the document with a matching type tag
    pub fn fire_document_event(&self, event: &str) {
        self.fire_document_event_as(event, event);
    }

    /// Fire `event` on the document, delivering `type_tag` as the event type
    pub fn fire_document_event_as(&self, event: &str, type_tag: &str) {
        let listeners: Vec<Rc<Listener>> = self
            .document_listeners
            .borrow()
            .get(event)
            .cloned()
            .unwrap_or_default();

        debug!(event, type_tag, listeners = listeners.len(), "Simulated document event");

        let host_event = HostEvent::new(type_tag);
        for listener in listeners {
            listener(&host_event);
        }
    }

    pub fn blur(&self) {
        Self::fire_slot(&self.on_blur, "blur");
    }

    pub fn focus_window(&self) {
        Self::fire_slot(&self.on_focus, "focus");
    }

    /// Drive one scripted signal against this host and `surface`
    pub fn replay(&self, surface: Option<&SimulatedSurface>, signal: &HostSignal) {
        match signal {
            HostSignal::VisibilityChange { hidden } => {
                self.set_hidden(*hidden);
                self.fire_visibility_change();
            }
            HostSignal::Pause => {
                if let Some(api) = self.api {
                    self.fire_document_event_as(api.change_event(), PAUSE_EVENT);
                }
            }
            HostSignal::Blur => self.blur(),
            HostSignal::Focus => self.focus_window(),
            HostSignal::PointerDown => {
                if let Some(surface) = surface {
                    surface.press();
                }
            }
            HostSignal::MouseLeave => {
                if let Some(surface) = surface {
                    surface.mouse_leave();
                }
            }
            HostSignal::MouseEnter => {
                if let Some(surface) = surface {
                    surface.mouse_enter();
                }
            }
        }
    }

    fn fire_slot(slot: &RefCell<Option<Rc<Listener>>>, event_type: &str) {
        let listener = slot.borrow().clone();
        if let Some(listener) = listener {
            listener(&HostEvent::new(event_type));
        }
    }
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for SimulatedHost {
    fn hidden_property(&self, name: &str) -> Option<bool> {
        match self.api {
            Some(api) if api.hidden_property() == name => Some(self.hidden.get()),
            _ => None,
        }
    }

    fn add_document_listener(&self, event: &str, listener: Listener) {
        self.document_listeners
            .borrow_mut()
            .entry(event.to_string())
            .or_default()
            .push(Rc::new(listener));
    }

    fn set_window_blur(&self, listener: Listener) {
        *self.on_blur.borrow_mut() = Some(Rc::new(listener));
    }

    fn set_window_focus(&self, listener: Listener) {
        *self.on_focus.borrow_mut() = Some(Rc::new(listener));
    }

    fn supports_focus(&self) -> bool {
        self.focus_supported
    }

    fn focus(&self) {
        if self.focus_supported {
            self.focus_requests.set(self.focus_requests.get() + 1);
        }
    }
}

/// In-process rendering surface paired with [`SimulatedHost`]
#[derive(Default)]
pub struct SimulatedSurface {
    pointer_down: RefCell<Vec<(Rc<Listener>, ListenerOptions)>>,
    on_mouse_out: RefCell<Option<Rc<Listener>>>,
    on_mouse_over: RefCell<Option<Rc<Listener>>>,
}

impl SimulatedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down_listener_count(&self) -> usize {
        self.pointer_down.borrow().len()
    }

    pub fn all_pointer_down_passive(&self) -> bool {
        self.pointer_down
            .borrow()
            .iter()
            .all(|(_, options)| options.passive)
    }

    pub fn has_mouse_handlers(&self) -> bool {
        self.on_mouse_out.borrow().is_some() && self.on_mouse_over.borrow().is_some()
    }

    pub fn press(&self) {
        let listeners: Vec<Rc<Listener>> = self
            .pointer_down
            .borrow()
            .iter()
            .map(|(listener, _)| Rc::clone(listener))
            .collect();

        let host_event = HostEvent::new("mousedown");
        for listener in listeners {
            listener(&host_event);
        }
    }

    pub fn mouse_leave(&self) {
        SimulatedHost::fire_slot(&self.on_mouse_out, "mouseout");
    }

    pub fn mouse_enter(&self) {
        SimulatedHost::fire_slot(&self.on_mouse_over, "mouseover");
    }
}

impl RenderSurface for SimulatedSurface {
    fn add_pointer_down_listener(&self, listener: Listener, options: ListenerOptions) {
        self.pointer_down
            .borrow_mut()
            .push((Rc::new(listener), options));
    }

    fn set_mouse_out(&self, listener: Listener) {
        *self.on_mouse_out.borrow_mut() = Some(Rc::new(listener));
    }

    fn set_mouse_over(&self, listener: Listener) {
        *self.on_mouse_over.borrow_mut() = Some(Rc::new(listener));
    }
}

/// A scripted host signal, as read from a replay script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum HostSignal {
    VisibilityChange { hidden: bool },
    /// App-shell backgrounding, delivered with the pause type tag
    Pause,
    Blur,
    Focus,
    PointerDown,
    MouseLeave,
    MouseEnter,
}
