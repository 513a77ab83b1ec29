//! Layout primitive that styles its host element instead of replacing
//! children.

use element_core::{
    AttributeChange, Component, ComponentSpec, DiagnosticCode, RenderCtx, UpdateOutcome,
};

/// Allowed `direction` values.
pub const STACK_DIRECTIONS: &[&str] = &["column", "row"];

/// Static configuration for `<ui-stack>`. Unstyled (`style_id: None`) and
/// layout-contained: pure structure, no companion stylesheet.
pub const STACK_SPEC: ComponentSpec = ComponentSpec {
    tag: "ui-stack",
    watched_attributes: &["direction", "gap"],
    style_id: None,
    containment: true,
};

/// `<ui-stack direction="row" gap="2">` — reflects validated layout tokens
/// into `data-*` attributes consumed by the shell CSS; never touches its
/// children, so authored content survives every render pass.
#[derive(Debug, Default)]
pub struct Stack;

impl Stack {
    fn reflect(&self, ctx: &RenderCtx<'_>) {
        let direction = ctx.enum_attr("direction", STACK_DIRECTIONS, "column");
        ctx.set_attr("data-layout-direction", &direction);

        let gap = ctx.attr("gap", "1");
        if gap.parse::<u32>().is_ok() {
            ctx.set_attr("data-layout-gap", &gap);
        } else {
            ctx.log_error(
                DiagnosticCode::InvalidAttributeValue,
                &format!("attribute \"gap\" has non-numeric value {gap:?}; using \"1\""),
            );
            ctx.set_attr("data-layout-gap", "1");
        }
    }
}

impl Component for Stack {
    fn spec(&self) -> &'static ComponentSpec {
        &STACK_SPEC
    }

    fn render(&mut self, ctx: &mut RenderCtx<'_>) {
        self.reflect(ctx);
    }

    fn update(&mut self, ctx: &mut RenderCtx<'_>, _change: &AttributeChange) -> UpdateOutcome {
        self.reflect(ctx);
        UpdateOutcome::Handled
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use element_core::{diagnostics, ElementHost, ElementRuntime, MemoryHost};
    use pretty_assertions::assert_eq;

    use super::*;

    fn stack_on(host: &MemoryHost) -> ElementRuntime {
        ElementRuntime::new(Box::new(Stack), Rc::new(host.clone()))
    }

    #[test]
    fn children_survive_rendering() {
        let host = MemoryHost::new("ui-stack");
        host.set_content("<ui-badge label=\"a\"></ui-badge>");
        stack_on(&host).connect();

        assert_eq!(host.content(), "<ui-badge label=\"a\"></ui-badge>");
        assert_eq!(host.attribute("data-layout-direction").as_deref(), Some("column"));
        assert_eq!(host.attribute("data-layout-gap").as_deref(), Some("1"));
        assert!(host.containment_applied());
    }

    #[test]
    fn direction_and_gap_update_in_place() {
        let host = MemoryHost::new("ui-stack");
        let mut runtime = stack_on(&host);
        runtime.connect();

        host.set_attribute("direction", "row");
        runtime.attribute_changed("direction", None, Some("row"));
        assert_eq!(host.attribute("data-layout-direction").as_deref(), Some("row"));

        host.set_attribute("gap", "3");
        runtime.attribute_changed("gap", None, Some("3"));
        assert_eq!(host.attribute("data-layout-gap").as_deref(), Some("3"));
    }

    #[test]
    fn non_numeric_gap_logs_and_uses_default() {
        diagnostics::reset();
        let host = MemoryHost::new("ui-stack");
        host.set_attribute("gap", "wide");
        stack_on(&host).connect();

        assert_eq!(host.attribute("data-layout-gap").as_deref(), Some("1"));
        let findings = diagnostics::get_all();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, DiagnosticCode::InvalidAttributeValue);
        assert_eq!(findings[0].component, "ui-stack");
    }
}
