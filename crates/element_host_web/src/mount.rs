//! Upgrading DOM elements into live component runtimes.
//!
//! [`mount`] wires one element: instantiates its registered component,
//! connects the runtime, and bridges attribute mutations through a
//! `MutationObserver` restricted to the component's watched attributes.
//! [`upgrade_all`] sweeps a document for every registered tag.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use element_core::{registry, ElementRuntime, LifecyclePhase, RegistryError, StyleService};

use crate::dom_host::WebHost;
use crate::style_dom::DocumentStyleSources;

/// Attribute marking an element as owned by a live [`MountedElement`], so a
/// second sweep does not double-mount it.
pub const MOUNTED_ATTR: &str = "data-ui-mounted";

/// Errors surfaced while upgrading an element.
#[derive(Debug, Error)]
pub enum MountError {
    /// The element's tag has no registered component type.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The attribute observer could not be installed.
    #[error("failed to observe attributes: {0}")]
    Observer(String),
}

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, web_sys::MutationObserver)>;

/// A live element: its runtime plus the observer bridging attribute
/// reactivity. Dropping it disconnects both.
pub struct MountedElement {
    element: web_sys::Element,
    runtime: Rc<RefCell<ElementRuntime>>,
    observer: Option<web_sys::MutationObserver>,
    _callback: Option<ObserverCallback>,
}

impl MountedElement {
    /// The underlying DOM element.
    pub fn element(&self) -> &web_sys::Element {
        &self.element
    }

    /// Tag of the mounted component.
    pub fn tag(&self) -> &'static str {
        self.runtime.borrow().spec().tag
    }

    /// Disconnects the runtime and the attribute observer.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for MountedElement {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        if let Ok(mut runtime) = self.runtime.try_borrow_mut() {
            if runtime.phase() == LifecyclePhase::Connected {
                runtime.disconnect();
            }
        }
        let _ = self.element.remove_attribute(MOUNTED_ATTR);
    }
}

/// Upgrades one element into a live component.
///
/// The runtime is connected before the observer is installed, so attribute
/// values present at mount time are absorbed into the initial render rather
/// than dispatched as updates.
///
/// # Errors
///
/// Returns [`MountError::Registry`] when no component type is registered for
/// the element's tag, and [`MountError::Observer`] when observer installation
/// fails.
pub fn mount(element: &web_sys::Element) -> Result<MountedElement, MountError> {
    let tag = element.tag_name().to_ascii_lowercase();
    let component = registry::instantiate(&tag)?;
    let spec = component.spec();

    let host = Rc::new(WebHost::new(element.clone()));
    let runtime = match DocumentStyleSources::for_element(element) {
        Some(sources) => ElementRuntime::with_styles(
            component,
            Rc::clone(&host) as Rc<dyn element_core::ElementHost>,
            StyleService::with_shared_registry(Rc::new(sources)),
        ),
        // Detached subtree: render and listen, skip stylesheet loading.
        None => ElementRuntime::new(component, Rc::clone(&host) as Rc<dyn element_core::ElementHost>),
    };
    let runtime = Rc::new(RefCell::new(runtime));
    runtime.borrow_mut().connect();

    let (observer, callback) = if spec.watched_attributes.is_empty() {
        (None, None)
    } else {
        let (observer, callback) = observe_attributes(element, &runtime, spec.watched_attributes)?;
        (Some(observer), Some(callback))
    };

    if element.set_attribute(MOUNTED_ATTR, "true").is_err() {
        log::warn!("failed to mark <{tag}> as mounted");
    }

    Ok(MountedElement {
        element: element.clone(),
        runtime,
        observer,
        _callback: callback,
    })
}

fn observe_attributes(
    element: &web_sys::Element,
    runtime: &Rc<RefCell<ElementRuntime>>,
    watched: &'static [&'static str],
) -> Result<(web_sys::MutationObserver, ObserverCallback), MountError> {
    let observed = element.clone();
    let runtime = Rc::clone(runtime);
    let callback: ObserverCallback = Closure::wrap(Box::new(
        move |records: js_sys::Array, _observer: web_sys::MutationObserver| {
            for record in records.iter() {
                let Ok(record) = record.dyn_into::<web_sys::MutationRecord>() else {
                    continue;
                };
                let Some(name) = record.attribute_name() else {
                    continue;
                };
                let old = record.old_value();
                let new = observed.get_attribute(&name);
                // The platform contract delivers only real changes.
                if old == new {
                    continue;
                }
                if let Ok(mut runtime) = runtime.try_borrow_mut() {
                    runtime.attribute_changed(&name, old.as_deref(), new.as_deref());
                }
            }
        },
    ));

    let init = web_sys::MutationObserverInit::new();
    init.set_attributes(true);
    init.set_attribute_old_value(true);
    let filter = js_sys::Array::new();
    for name in watched {
        filter.push(&JsValue::from_str(name));
    }
    init.set_attribute_filter(&filter);

    let observer = web_sys::MutationObserver::new(callback.as_ref().unchecked_ref())
        .map_err(|err| MountError::Observer(format!("{err:?}")))?;
    observer
        .observe_with_options(element, &init)
        .map_err(|err| MountError::Observer(format!("{err:?}")))?;
    Ok((observer, callback))
}

/// Sweeps `document` for every registered tag and mounts each not-yet-mounted
/// match. Individual failures are logged and skipped.
pub fn upgrade_all(document: &web_sys::Document) -> Vec<MountedElement> {
    let mut mounted = Vec::new();
    for tag in registry::registered_tags() {
        let Ok(list) = document.query_selector_all(&tag) else {
            continue;
        };
        for index in 0..list.length() {
            let Some(node) = list.item(index) else {
                continue;
            };
            let Ok(element) = node.dyn_into::<web_sys::Element>() else {
                continue;
            };
            if element.has_attribute(MOUNTED_ATTR) {
                continue;
            }
            match mount(&element) {
                Ok(live) => mounted.push(live),
                Err(err) => log::warn!("failed to mount <{tag}>: {err}"),
            }
        }
    }
    mounted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_error_messages_are_descriptive() {
        let err = MountError::from(RegistryError::UnknownTag("ui-missing".to_string()));
        assert_eq!(err.to_string(), "no component registered for tag `ui-missing`");

        let err = MountError::Observer("boom".to_string());
        assert_eq!(err.to_string(), "failed to observe attributes: boom");
    }
}
