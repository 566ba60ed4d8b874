use js_sys::Reflect;
use tracing::warn;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Document, Event, HtmlCanvasElement, Window};

use super::{Host, HostEvent, Listener, ListenerOptions, RenderSurface};

/// Wrap a listener into a JS callback that lives for the rest of the page
fn into_callback(listener: Listener) -> js_sys::Function {
    let closure = Closure::<dyn Fn(Event)>::new(move |event: Event| {
        listener(&HostEvent::new(event.type_()));
    });
    closure.into_js_value().unchecked_into()
}

/// The browser window and document the game is embedded in
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    /// Bind to the global window, `None` outside a browser main thread
    pub fn from_global() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }
}

impl Host for WebHost {
    fn hidden_property(&self, name: &str) -> Option<bool> {
        let value = Reflect::get(&self.document, &JsValue::from_str(name)).ok()?;
        if value.is_undefined() {
            None
        } else {
            Some(value.is_truthy())
        }
    }

    fn add_document_listener(&self, event: &str, listener: Listener) {
        let callback = into_callback(listener);
        if let Err(e) = self
            .document
            .add_event_listener_with_callback(event, &callback)
        {
            warn!(event, error = ?e, "Failed to attach document listener");
        }
    }

    fn set_window_blur(&self, listener: Listener) {
        self.window.set_onblur(Some(&into_callback(listener)));
    }

    fn set_window_focus(&self, listener: Listener) {
        self.window.set_onfocus(Some(&into_callback(listener)));
    }

    fn supports_focus(&self) -> bool {
        Reflect::get(&self.window, &JsValue::from_str("focus"))
            .map(|value| value.is_function())
            .unwrap_or(false)
    }

    fn focus(&self) {
        if let Err(e) = self.window.focus() {
            warn!(error = ?e, "Window focus request failed");
        }
    }
}

/// The canvas the game renders into
pub struct WebSurface {
    canvas: HtmlCanvasElement,
}

impl WebSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl RenderSurface for WebSurface {
    fn add_pointer_down_listener(&self, listener: Listener, options: ListenerOptions) {
        let callback = into_callback(listener);
        let js_options = AddEventListenerOptions::new();
        js_options.set_passive(options.passive);

        if let Err(e) = self
            .canvas
            .add_event_listener_with_callback_and_add_event_listener_options(
                "mousedown",
                &callback,
                &js_options,
            )
        {
            warn!(error = ?e, "Failed to attach pointer-down listener");
        }
    }

    fn set_mouse_out(&self, listener: Listener) {
        self.canvas.set_onmouseout(Some(&into_callback(listener)));
    }

    fn set_mouse_over(&self, listener: Listener) {
        self.canvas.set_onmouseover(Some(&into_callback(listener)));
    }
}
