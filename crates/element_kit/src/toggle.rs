//! Two-state switch with an incremental update path for its checked state.

use element_core::{
    AttributeChange, Component, ComponentSpec, ListenTarget, RenderCtx, UpdateOutcome,
};
use serde_json::json;

/// Static configuration for `<ui-toggle>`.
pub const TOGGLE_SPEC: ComponentSpec = ComponentSpec {
    tag: "ui-toggle",
    watched_attributes: &["checked", "disabled"],
    style_id: Some("toggle"),
    containment: false,
};

/// Event emitted after the user flips the switch. Detail: `{ "checked": bool }`.
pub const TOGGLE_CHANGE_EVENT: &str = "toggle-change";

fn markup(checked: bool, disabled: bool, label: &str) -> String {
    let state = if checked { "on" } else { "off" };
    let disabled_attr = if disabled { " disabled" } else { "" };
    format!(
        "<button type=\"button\" class=\"toggle toggle-{state}\" role=\"switch\" \
         aria-checked=\"{checked}\"{disabled_attr}>{}</button>",
        html_escape::encode_text(label)
    )
}

/// `<ui-toggle checked aria-label="Notifications">` — flips its `checked`
/// attribute on click and emits [`TOGGLE_CHANGE_EVENT`]; the `checked`
/// reactivity round-trip is handled incrementally, `disabled` falls back to a
/// full render.
#[derive(Debug, Default)]
pub struct Toggle;

impl Toggle {
    fn render_state(&self, ctx: &RenderCtx<'_>) -> String {
        markup(
            ctx.has("checked"),
            ctx.has("disabled"),
            &ctx.attr("aria-label", ""),
        )
    }
}

impl Component for Toggle {
    fn spec(&self) -> &'static ComponentSpec {
        &TOGGLE_SPEC
    }

    fn render(&mut self, ctx: &mut RenderCtx<'_>) {
        ctx.require_label(&["aria-label", "title"]);
        let html = self.render_state(ctx);
        ctx.set_content(&html);
    }

    fn update(&mut self, ctx: &mut RenderCtx<'_>, change: &AttributeChange) -> UpdateOutcome {
        if change.name == "checked" {
            let html = self.render_state(ctx);
            ctx.set_content(&html);
            return UpdateOutcome::Handled;
        }
        UpdateOutcome::Rerender
    }

    fn bind(&mut self, ctx: &mut RenderCtx<'_>) {
        let host = ctx.host();
        ctx.listen(ListenTarget::Host, "click", "flip", move |_| {
            if host.has_attribute("disabled") {
                return;
            }
            let checked = !host.has_attribute("checked");
            if checked {
                host.set_attribute("checked", "");
            } else {
                host.remove_attribute("checked");
            }
            host.dispatch(TOGGLE_CHANGE_EVENT, &json!({ "checked": checked }));
        });
    }
}
