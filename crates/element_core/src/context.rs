//! The surface components see while rendering, updating, binding, and
//! tearing down.

use std::rc::Rc;

use serde_json::Value;

use crate::diagnostics::{self, DiagnosticCode};
use crate::host::{ElementHost, EventView, ListenTarget};
use crate::listeners::ListenerScope;

/// Borrowed view over the host element, the live listener scope, and the
/// component's identity, handed to every [`Component`](crate::component::Component)
/// hook.
pub struct RenderCtx<'a> {
    host: &'a Rc<dyn ElementHost>,
    scope: &'a mut ListenerScope,
    tag: &'a str,
}

impl<'a> RenderCtx<'a> {
    /// Builds a context; engine-internal.
    pub(crate) fn new(
        host: &'a Rc<dyn ElementHost>,
        scope: &'a mut ListenerScope,
        tag: &'a str,
    ) -> Self {
        Self { host, scope, tag }
    }

    /// The component's registered tag.
    pub fn tag(&self) -> &str {
        self.tag
    }

    /// A shared handle to the host element, for event handlers that need to
    /// mutate attributes or emit events when they later fire.
    pub fn host(&self) -> Rc<dyn ElementHost> {
        Rc::clone(self.host)
    }

    /// Reads a valued attribute, returning `default` verbatim when absent.
    ///
    /// No coercion or validation happens here; an empty string set on the
    /// element comes back as an empty string, not as `default`.
    pub fn attr(&self, name: &str, default: &str) -> String {
        self.host
            .attribute(name)
            .unwrap_or_else(|| default.to_string())
    }

    /// Reads a boolean-style attribute: presence is truth, values carry no
    /// meaning.
    pub fn has(&self, name: &str) -> bool {
        self.host.has_attribute(name)
    }

    /// Writes an attribute on the host element.
    pub fn set_attr(&self, name: &str, value: &str) {
        self.host.set_attribute(name, value);
    }

    /// Removes an attribute from the host element.
    pub fn remove_attr(&self, name: &str) {
        self.host.remove_attribute(name);
    }

    /// Returns the host element's current inner markup.
    pub fn content(&self) -> String {
        self.host.content()
    }

    /// Replaces the host element's inner markup.
    pub fn set_content(&self, html: &str) {
        self.host.set_content(html);
    }

    /// Attaches an event listener tied to the current connection's scope.
    ///
    /// Re-registering the same `(target, event, key)` triple replaces the
    /// previous handler, so calling this from every render pass is safe.
    pub fn listen<F>(&mut self, target: ListenTarget, event: &str, key: &'static str, handler: F)
    where
        F: Fn(&EventView) + 'static,
    {
        self.scope
            .listen(self.host.as_ref(), &target, event, key, Rc::new(handler));
    }

    /// Dispatches a bubbling, cancelable custom event from the host element
    /// with `detail` attached verbatim. Returns `false` when a consumer
    /// cancelled it.
    pub fn emit(&self, name: &str, detail: Value) -> bool {
        self.host.dispatch(name, &detail)
    }

    /// Appends an advisory finding to the process-wide diagnostics log,
    /// tagged with this component's tag. Never interrupts rendering.
    pub fn log_error(&self, code: DiagnosticCode, message: &str) {
        diagnostics::log_error(code, self.tag, message);
    }

    /// Reads an enumerated attribute, logging `invalid-attribute-value` and
    /// returning `default` when the value is outside `allowed`. An absent
    /// attribute returns `default` silently.
    pub fn enum_attr(&self, name: &str, allowed: &[&str], default: &str) -> String {
        match self.host.attribute(name) {
            Some(value) if allowed.contains(&value.as_str()) => value,
            Some(value) => {
                self.log_error(
                    DiagnosticCode::InvalidAttributeValue,
                    &format!("attribute {name:?} has invalid value {value:?}; using {default:?}"),
                );
                default.to_string()
            }
            None => default.to_string(),
        }
    }

    /// Logs `missing-label` when none of the candidate labelling attributes
    /// is present. Advisory only; rendering proceeds.
    pub fn require_label(&self, candidates: &[&str]) {
        if candidates.iter().any(|name| self.host.has_attribute(name)) {
            return;
        }
        self.log_error(
            DiagnosticCode::MissingLabel,
            &format!("no accessible label found in any of {candidates:?}"),
        );
    }
}
