//! Small status label with an enumerated color variant.

use element_core::{Component, ComponentSpec, RenderCtx};

/// Allowed `variant` values.
pub const BADGE_VARIANTS: &[&str] = &["neutral", "info", "success", "warning", "danger"];

/// Static configuration for `<ui-badge>`.
pub const BADGE_SPEC: ComponentSpec = ComponentSpec {
    tag: "ui-badge",
    watched_attributes: &["variant", "label"],
    style_id: Some("badge"),
    containment: false,
};

/// `<ui-badge variant="info" label="Beta">` — declares no incremental update
/// path, so every watched-attribute change goes through the engine's full
/// re-render fallback.
#[derive(Debug, Default)]
pub struct Badge;

impl Component for Badge {
    fn spec(&self) -> &'static ComponentSpec {
        &BADGE_SPEC
    }

    fn render(&mut self, ctx: &mut RenderCtx<'_>) {
        let variant = ctx.enum_attr("variant", BADGE_VARIANTS, "neutral");
        let label = ctx.attr("label", "");
        ctx.require_label(&["label", "aria-label"]);
        ctx.set_content(&format!(
            "<span class=\"badge badge-{variant}\" role=\"status\">{}</span>",
            html_escape::encode_text(&label)
        ));
    }
}
