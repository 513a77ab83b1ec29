//! `web-sys`-backed [`ElementHost`] implementation.
//!
//! One [`WebHost`] wraps one DOM element. Event listeners are attached with
//! retained `Closure`s keyed by listener handle; detaching removes the DOM
//! listener and drops the closure, so nothing outlives the scope that owns
//! the handle.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use element_core::{ElementHost, EventCallback, EventView, ListenTarget, ListenerHandle};

struct DomListener {
    target: web_sys::EventTarget,
    event: String,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

/// Browser host element adapter.
pub struct WebHost {
    element: web_sys::Element,
    listeners: RefCell<HashMap<u64, DomListener>>,
    next_handle: Cell<u64>,
}

impl WebHost {
    /// Wraps a DOM element.
    pub fn new(element: web_sys::Element) -> Self {
        Self {
            element,
            listeners: RefCell::new(HashMap::new()),
            next_handle: Cell::new(0),
        }
    }

    /// The wrapped DOM element.
    pub fn element(&self) -> &web_sys::Element {
        &self.element
    }

    fn resolve_target(&self, target: &ListenTarget) -> Option<web_sys::EventTarget> {
        match target {
            ListenTarget::Host => Some(self.element.clone().into()),
            ListenTarget::Selector(css) => self
                .element
                .query_selector(css)
                .ok()
                .flatten()
                .map(Into::into),
            ListenTarget::Document => self.element.owner_document().map(Into::into),
            ListenTarget::Window => web_sys::window().map(Into::into),
        }
    }
}

/// Normalizes a raw DOM event into the engine's [`EventView`].
pub(crate) fn event_view(event: &web_sys::Event) -> EventView {
    let detail = event
        .dyn_ref::<web_sys::CustomEvent>()
        .map(|custom| serde_wasm_bindgen::from_value(custom.detail()).unwrap_or(Value::Null))
        .unwrap_or(Value::Null);

    let target_value = event.target().and_then(|target| {
        if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
            Some(input.value())
        } else if let Some(area) = target.dyn_ref::<web_sys::HtmlTextAreaElement>() {
            Some(area.value())
        } else {
            target
                .dyn_ref::<web_sys::HtmlSelectElement>()
                .map(|select| select.value())
        }
    });

    EventView {
        name: event.type_(),
        detail,
        target_value,
    }
}

impl ElementHost for WebHost {
    fn tag(&self) -> String {
        self.element.tag_name().to_ascii_lowercase()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.element.has_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if self.element.set_attribute(name, value).is_err() {
            log::warn!("failed to set attribute {name:?} on <{}>", self.tag());
        }
    }

    fn remove_attribute(&self, name: &str) {
        let _ = self.element.remove_attribute(name);
    }

    fn content(&self) -> String {
        self.element.inner_html()
    }

    fn set_content(&self, html: &str) {
        self.element.set_inner_html(html);
    }

    fn apply_containment(&self) {
        if let Some(html) = self.element.dyn_ref::<web_sys::HtmlElement>() {
            let _ = html.style().set_property("contain", "content");
        }
    }

    fn attach(
        &self,
        target: &ListenTarget,
        event: &str,
        callback: EventCallback,
    ) -> Option<ListenerHandle> {
        let resolved = self.resolve_target(target)?;
        let closure = Closure::wrap(Box::new(move |raw: web_sys::Event| {
            callback(&event_view(&raw));
        }) as Box<dyn FnMut(web_sys::Event)>);

        if resolved
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("failed to attach {event:?} listener on {}", target.key());
            return None;
        }

        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        self.listeners.borrow_mut().insert(
            handle,
            DomListener {
                target: resolved,
                event: event.to_string(),
                closure,
            },
        );
        Some(ListenerHandle(handle))
    }

    fn detach(&self, handle: ListenerHandle) {
        if let Some(listener) = self.listeners.borrow_mut().remove(&handle.0) {
            let _ = listener.target.remove_event_listener_with_callback(
                &listener.event,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
    }

    fn dispatch(&self, name: &str, detail: &Value) -> bool {
        let init = web_sys::CustomEventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        init.set_detail(&serde_wasm_bindgen::to_value(detail).unwrap_or(JsValue::NULL));

        match web_sys::CustomEvent::new_with_event_init_dict(name, &init) {
            Ok(event) => self.element.dispatch_event(&event).unwrap_or(true),
            Err(_) => {
                log::warn!("failed to construct custom event {name:?}");
                true
            }
        }
    }
}
