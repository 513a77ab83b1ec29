//! Host-platform surface the engine drives.
//!
//! The engine never touches a concrete DOM API; it talks to an object-safe
//! [`ElementHost`] per element. The browser implementation lives in
//! `element_host_web`; [`MemoryHost`] here is the in-memory double used by
//! native tests and headless rendering.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

/// Event targets a component may scope listeners to, resolved by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenTarget {
    /// The component's own host element.
    Host,
    /// A descendant of the host element, by CSS selector.
    Selector(String),
    /// The owning document.
    Document,
    /// The window.
    Window,
}

impl ListenTarget {
    /// Returns a stable key for binding bookkeeping.
    pub fn key(&self) -> String {
        match self {
            Self::Host => "host".to_string(),
            Self::Selector(css) => format!("selector:{css}"),
            Self::Document => "document".to_string(),
            Self::Window => "window".to_string(),
        }
    }
}

/// Host-normalized view of an event delivered to a scoped listener.
#[derive(Debug, Clone, PartialEq)]
pub struct EventView {
    /// Event type name.
    pub name: String,
    /// Detail payload for custom events, `Null` otherwise.
    pub detail: Value,
    /// Current value of the event target when it is a form control.
    pub target_value: Option<String>,
}

impl EventView {
    /// Builds a bare view carrying only the event name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail: Value::Null,
            target_value: None,
        }
    }
}

/// Handler invoked when a scoped listener fires.
pub type EventCallback = Rc<dyn Fn(&EventView)>;

/// Opaque handle identifying one attached listener on a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u64);

/// Object-safe surface one element exposes to the engine.
///
/// All methods are total: unresolvable targets yield `None` from [`attach`](Self::attach)
/// and every other operation degrades to a no-op rather than failing.
pub trait ElementHost {
    /// Lowercase tag name of the host element.
    fn tag(&self) -> String;

    /// Reads an attribute value; `None` when absent.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Returns whether the attribute is present, regardless of value.
    fn has_attribute(&self, name: &str) -> bool;

    /// Writes an attribute value.
    fn set_attribute(&self, name: &str, value: &str);

    /// Removes an attribute if present.
    fn remove_attribute(&self, name: &str);

    /// Returns the element's current inner markup.
    fn content(&self) -> String;

    /// Replaces the element's inner markup wholesale.
    fn set_content(&self, html: &str);

    /// Applies CSS layout containment to the host element.
    fn apply_containment(&self);

    /// Attaches `callback` to `target` for `event`; `None` when the target
    /// cannot be resolved (e.g. a selector matching nothing).
    fn attach(&self, target: &ListenTarget, event: &str, callback: EventCallback)
        -> Option<ListenerHandle>;

    /// Detaches a previously attached listener; unknown handles are ignored.
    fn detach(&self, handle: ListenerHandle);

    /// Dispatches a bubbling, cancelable custom event from the host element
    /// with `detail` attached verbatim. Returns `false` when a consumer
    /// cancelled it.
    fn dispatch(&self, name: &str, detail: &Value) -> bool;
}

struct MemoryListener {
    target_key: String,
    event: String,
    callback: EventCallback,
}

#[derive(Default)]
struct MemoryHostState {
    tag: String,
    attributes: BTreeMap<String, String>,
    content: String,
    containment_applied: bool,
    listeners: Vec<(ListenerHandle, MemoryListener)>,
    next_handle: u64,
    dispatched: Vec<(String, Value)>,
    cancel_dispatch: bool,
}

/// In-memory [`ElementHost`] used by native tests and headless rendering.
///
/// Clones share state, so a test can keep a handle for assertions while the
/// runtime owns another.
#[derive(Clone)]
pub struct MemoryHost {
    state: Rc<RefCell<MemoryHostState>>,
}

impl MemoryHost {
    /// Creates a host for an element with the given tag.
    pub fn new(tag: &str) -> Self {
        Self {
            state: Rc::new(RefCell::new(MemoryHostState {
                tag: tag.to_string(),
                ..MemoryHostState::default()
            })),
        }
    }

    /// Returns whether containment styling was applied.
    pub fn containment_applied(&self) -> bool {
        self.state.borrow().containment_applied
    }

    /// Returns every event dispatched through [`ElementHost::dispatch`].
    pub fn dispatched(&self) -> Vec<(String, Value)> {
        self.state.borrow().dispatched.clone()
    }

    /// Makes subsequent dispatches report cancellation.
    pub fn set_cancel_dispatch(&self, cancel: bool) {
        self.state.borrow_mut().cancel_dispatch = cancel;
    }

    /// Number of currently attached listeners.
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Fires an event at every listener attached to `target` for `event`.
    ///
    /// Callbacks run after the internal borrow is released, so handlers may
    /// re-enter the host (attach, detach, dispatch).
    pub fn fire(&self, target: &ListenTarget, event: &str, view: &EventView) {
        let key = target.key();
        let callbacks: Vec<EventCallback> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|(_, l)| l.target_key == key && l.event == event)
            .map(|(_, l)| Rc::clone(&l.callback))
            .collect();
        for cb in callbacks {
            cb(view);
        }
    }
}

impl ElementHost for MemoryHost {
    fn tag(&self) -> String {
        self.state.borrow().tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.state.borrow().attributes.contains_key(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, name: &str) {
        self.state.borrow_mut().attributes.remove(name);
    }

    fn content(&self) -> String {
        self.state.borrow().content.clone()
    }

    fn set_content(&self, html: &str) {
        self.state.borrow_mut().content = html.to_string();
    }

    fn apply_containment(&self) {
        self.state.borrow_mut().containment_applied = true;
    }

    fn attach(
        &self,
        target: &ListenTarget,
        event: &str,
        callback: EventCallback,
    ) -> Option<ListenerHandle> {
        let mut state = self.state.borrow_mut();
        state.next_handle += 1;
        let handle = ListenerHandle(state.next_handle);
        state.listeners.push((
            handle,
            MemoryListener {
                target_key: target.key(),
                event: event.to_string(),
                callback,
            },
        ));
        Some(handle)
    }

    fn detach(&self, handle: ListenerHandle) {
        self.state
            .borrow_mut()
            .listeners
            .retain(|(h, _)| *h != handle);
    }

    fn dispatch(&self, name: &str, detail: &Value) -> bool {
        let mut state = self.state.borrow_mut();
        state.dispatched.push((name.to_string(), detail.clone()));
        !state.cancel_dispatch
    }
}
