//! The contract every component type implements.

use crate::context::RenderCtx;
use crate::descriptor::ComponentSpec;

/// What a component did with an incremental attribute change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The change was applied in place; no further work needed.
    Handled,
    /// The component has no incremental path for this change; the engine runs
    /// a full render pass.
    Rerender,
}

/// One watched-attribute mutation as delivered by the host platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    /// Attribute name; always one of the component's watched attributes.
    pub name: String,
    /// Previous value, `None` when the attribute was absent.
    pub old: Option<String>,
    /// New value, `None` when the attribute was removed.
    pub new: Option<String>,
}

/// A declarative UI component driven by [`ElementRuntime`](crate::lifecycle::ElementRuntime).
///
/// `render` is the only required method. The engine guarantees it is not
/// re-invoked structurally when the element's content already exists, so
/// implementations may build markup unconditionally. Panics in `render` and
/// `update` are component programmer errors and are deliberately not caught.
pub trait Component {
    /// Static configuration for the component type.
    fn spec(&self) -> &'static ComponentSpec;

    /// Builds the component's structure into the host element.
    fn render(&mut self, ctx: &mut RenderCtx<'_>);

    /// Applies one watched-attribute change incrementally.
    ///
    /// The default declares no incremental path, making the engine fall back
    /// to a full render pass.
    fn update(&mut self, ctx: &mut RenderCtx<'_>, change: &AttributeChange) -> UpdateOutcome {
        let _ = (ctx, change);
        UpdateOutcome::Rerender
    }

    /// Attaches event listeners. Runs on every connect, including reconnects
    /// that skip the structural render, because the previous connection's
    /// listener scope was invalidated on disconnect.
    fn bind(&mut self, ctx: &mut RenderCtx<'_>) {
        let _ = ctx;
    }

    /// Releases component-owned external resources (observers, timers) on
    /// disconnect. Listeners attached through the scope need no handling
    /// here; the engine cancels the scope itself.
    fn teardown(&mut self, ctx: &mut RenderCtx<'_>) {
        let _ = ctx;
    }
}
