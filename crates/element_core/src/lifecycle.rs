//! The per-element lifecycle state machine.
//!
//! The host platform owns callback timing, not this engine: insertion may be
//! reported more than once, attribute mutations may arrive before or after
//! any of them, and removal can interleave arbitrarily. The runtime therefore
//! guards every transition instead of assuming call-once semantics.

use std::rc::Rc;

use crate::component::{AttributeChange, Component, UpdateOutcome};
use crate::context::RenderCtx;
use crate::descriptor::ComponentSpec;
use crate::host::ElementHost;
use crate::listeners::ListenerScope;
use crate::styles::StyleService;

/// Marker attribute the engine sets on the host element after the first
/// structural render. Reconnection over already-rendered markup (including a
/// rebuilt runtime over server-rendered content) is detected through it, so
/// component output can never be mistaken for rendered-ness.
pub const RENDER_MARKER_ATTR: &str = "data-ui-rendered";

/// Where an element stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Constructed, never inserted into a document.
    Unattached,
    /// Between insertion and removal.
    Connected,
    /// Removed; may be reconnected later.
    Disconnected,
}

/// Drives one component instance against one host element.
pub struct ElementRuntime {
    spec: &'static ComponentSpec,
    component: Box<dyn Component>,
    host: Rc<dyn ElementHost>,
    styles: Option<StyleService>,
    phase: LifecyclePhase,
    rendered: bool,
    scope: ListenerScope,
}

impl ElementRuntime {
    /// Builds a runtime with no stylesheet service; the component's
    /// `style_id` (if any) is ignored. Used by headless rendering and tests
    /// that assert on everything but styles.
    pub fn new(component: Box<dyn Component>, host: Rc<dyn ElementHost>) -> Self {
        let spec = component.spec();
        Self {
            spec,
            component,
            host,
            styles: None,
            phase: LifecyclePhase::Unattached,
            rendered: false,
            scope: ListenerScope::new(),
        }
    }

    /// Builds a runtime wired to a stylesheet service shared across runtimes.
    pub fn with_styles(
        component: Box<dyn Component>,
        host: Rc<dyn ElementHost>,
        styles: StyleService,
    ) -> Self {
        let mut runtime = Self::new(component, host);
        runtime.styles = Some(styles);
        runtime
    }

    /// Static configuration of the driven component type.
    pub fn spec(&self) -> &'static ComponentSpec {
        self.spec
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Whether the first structural render has completed.
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    /// Insertion callback. Idempotent and re-entrant: repeated calls without
    /// an intervening disconnect neither re-render nor mint a second live
    /// listener scope.
    pub fn connect(&mut self) {
        // A fresh scope is minted only when the previous one was invalidated
        // by a disconnect; a connected → connected self-loop keeps the live
        // one, so at most one live scope exists at any time.
        if !self.scope.is_live() {
            self.scope = ListenerScope::new();
        }

        let already_rendered = self.rendered || self.host.has_attribute(RENDER_MARKER_ATTR);
        if already_rendered {
            // Structure exists (earlier connect, or markup rendered before
            // this runtime was built); only listeners need refreshing.
            self.rendered = true;
            log::debug!("<{}> reconnect, skipping structural render", self.spec.tag);
        } else {
            self.render_pass();
        }

        if self.spec.containment {
            self.host.apply_containment();
        }

        let mut ctx = RenderCtx::new(&self.host, &mut self.scope, self.spec.tag);
        self.component.bind(&mut ctx);

        if let (Some(styles), Some(style_id)) = (&self.styles, self.spec.style_id) {
            styles.ensure(style_id);
        }

        self.phase = LifecyclePhase::Connected;
    }

    /// Removal callback. Invalidates the listener scope, detaching every
    /// handler attached through it in one operation, then runs the
    /// component's teardown hook.
    pub fn disconnect(&mut self) {
        self.scope.cancel(self.host.as_ref());
        let mut ctx = RenderCtx::new(&self.host, &mut self.scope, self.spec.tag);
        self.component.teardown(&mut ctx);
        self.phase = LifecyclePhase::Disconnected;
        log::debug!("<{}> disconnected", self.spec.tag);
    }

    /// Attribute-mutation callback.
    ///
    /// The platform filters no-op mutations (`old == new`) before calling in;
    /// the watched-name check is repeated here so headless drivers share the
    /// adapter's contract. Changes arriving before the first render are
    /// absorbed into it.
    pub fn attribute_changed(&mut self, name: &str, old: Option<&str>, new: Option<&str>) {
        if !self.spec.watches(name) {
            return;
        }
        if !self.rendered {
            return;
        }

        let change = AttributeChange {
            name: name.to_string(),
            old: old.map(str::to_string),
            new: new.map(str::to_string),
        };
        let outcome = {
            let mut ctx = RenderCtx::new(&self.host, &mut self.scope, self.spec.tag);
            self.component.update(&mut ctx, &change)
        };
        if outcome == UpdateOutcome::Rerender {
            self.render_pass();
            let mut ctx = RenderCtx::new(&self.host, &mut self.scope, self.spec.tag);
            self.component.bind(&mut ctx);
        }
    }

    fn render_pass(&mut self) {
        {
            let mut ctx = RenderCtx::new(&self.host, &mut self.scope, self.spec.tag);
            self.component.render(&mut ctx);
        }
        self.host.set_attribute(RENDER_MARKER_ATTR, "true");
        self.rendered = true;
        log::debug!("<{}> rendered", self.spec.tag);
    }
}
