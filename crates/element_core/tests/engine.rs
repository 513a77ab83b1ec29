//! End-to-end engine behavior over the in-memory host: lifecycle idempotence,
//! listener-scope invalidation, stylesheet dedup, and diagnostics flow.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pretty_assertions::assert_eq;
use serde_json::json;

use element_core::{
    diagnostics, Component, ComponentSpec, ElementHost, ElementRuntime, EventView, ListenTarget,
    MemoryHost, MemoryStyleSources, RenderCtx, StyleRegistry, StyleService, StyleSources,
    UpdateOutcome,
};

const CHIP_SPEC: ComponentSpec = ComponentSpec {
    tag: "ui-chip",
    watched_attributes: &["variant", "label"],
    style_id: Some("chip"),
    containment: false,
};

const CHIP_GROUP_SPEC: ComponentSpec = ComponentSpec {
    tag: "ui-chip-group",
    watched_attributes: &[],
    style_id: Some("chip"),
    containment: true,
};

/// Small but complete component: enumerated attribute, incremental update for
/// `label`, full re-render for `variant`, a scoped click listener, and an
/// emitted event.
#[derive(Default)]
struct Chip {
    presses: Rc<Cell<u32>>,
}

impl Component for Chip {
    fn spec(&self) -> &'static ComponentSpec {
        &CHIP_SPEC
    }

    fn render(&mut self, ctx: &mut RenderCtx<'_>) {
        let variant = ctx.enum_attr("variant", &["neutral", "accent"], "neutral");
        let label = ctx.attr("label", "");
        ctx.require_label(&["label", "aria-label"]);
        ctx.set_content(&format!(
            "<span class=\"chip chip-{variant}\" data-part=\"label\">{label}</span>"
        ));
    }

    fn update(&mut self, ctx: &mut RenderCtx<'_>, change: &element_core::AttributeChange) -> UpdateOutcome {
        if change.name == "label" {
            // Incremental path: patch the label span in place.
            let variant = ctx.enum_attr("variant", &["neutral", "accent"], "neutral");
            let label = change.new.clone().unwrap_or_default();
            ctx.set_content(&format!(
                "<span class=\"chip chip-{variant}\" data-part=\"label\">{label}</span>"
            ));
            return UpdateOutcome::Handled;
        }
        UpdateOutcome::Rerender
    }

    fn bind(&mut self, ctx: &mut RenderCtx<'_>) {
        let presses = Rc::clone(&self.presses);
        ctx.listen(ListenTarget::Host, "click", "press", move |_| {
            presses.set(presses.get() + 1);
        });
    }
}

struct ChipGroup;

impl Component for ChipGroup {
    fn spec(&self) -> &'static ComponentSpec {
        &CHIP_GROUP_SPEC
    }

    fn render(&mut self, ctx: &mut RenderCtx<'_>) {
        ctx.set_content("<div class=\"chip-group\"></div>");
    }
}

struct Harness {
    runtime: ElementRuntime,
    host: MemoryHost,
    presses: Rc<Cell<u32>>,
    sources: Rc<MemoryStyleSources>,
}

fn chip_harness(registry: &Rc<RefCell<StyleRegistry>>, sources: &Rc<MemoryStyleSources>) -> Harness {
    let host = MemoryHost::new("ui-chip");
    host.set_attribute("label", "One");
    let chip = Chip::default();
    let presses = Rc::clone(&chip.presses);
    let styles = StyleService::new(
        Rc::clone(registry),
        Rc::clone(sources) as Rc<dyn StyleSources>,
    );
    let runtime = ElementRuntime::with_styles(Box::new(chip), Rc::new(host.clone()), styles);
    Harness {
        runtime,
        host,
        presses,
        sources: Rc::clone(sources),
    }
}

fn fresh_style_world() -> (Rc<RefCell<StyleRegistry>>, Rc<MemoryStyleSources>) {
    (
        Rc::new(RefCell::new(StyleRegistry::new())),
        Rc::new(MemoryStyleSources::new()),
    )
}

#[test]
fn connect_twice_yields_byte_identical_markup() {
    let (registry, sources) = fresh_style_world();
    let mut h = chip_harness(&registry, &sources);

    h.runtime.connect();
    let once = h.host.content();
    h.runtime.connect();

    assert_eq!(h.host.content(), once);
}

#[test]
fn listeners_from_a_previous_connection_never_fire_again() {
    let (registry, sources) = fresh_style_world();
    let mut h = chip_harness(&registry, &sources);

    h.runtime.connect();
    h.host.fire(&ListenTarget::Host, "click", &EventView::named("click"));
    assert_eq!(h.presses.get(), 1);

    h.runtime.disconnect();
    h.host.fire(&ListenTarget::Host, "click", &EventView::named("click"));
    assert_eq!(h.presses.get(), 1);

    h.runtime.connect();
    h.host.fire(&ListenTarget::Host, "click", &EventView::named("click"));
    assert_eq!(h.presses.get(), 2);
    assert_eq!(h.host.listener_count(), 1);
}

#[test]
fn synchronous_connect_disconnect_connect_leaks_nothing() {
    let (registry, sources) = fresh_style_world();
    let mut h = chip_harness(&registry, &sources);

    h.runtime.connect();
    h.runtime.disconnect();
    h.runtime.connect();

    assert_eq!(h.host.listener_count(), 1);
    assert_eq!(h.sources.injected().len(), 1);
}

#[test]
fn n_instances_sharing_a_style_id_cause_one_injection() {
    let (registry, sources) = fresh_style_world();
    let mut a = chip_harness(&registry, &sources);
    let mut b = chip_harness(&registry, &sources);
    let mut c = chip_harness(&registry, &sources);

    a.runtime.connect();
    b.runtime.connect();
    c.runtime.connect();

    assert_eq!(sources.injected(), vec![("chip".to_string(), "/styles/chip.css".to_string())]);
}

#[test]
fn different_component_types_share_one_style_load() {
    let (registry, sources) = fresh_style_world();
    let mut chip = chip_harness(&registry, &sources);

    let group_host = MemoryHost::new("ui-chip-group");
    let styles = StyleService::new(
        Rc::clone(&registry),
        Rc::clone(&sources) as Rc<dyn StyleSources>,
    );
    let mut group =
        ElementRuntime::with_styles(Box::new(ChipGroup), Rc::new(group_host.clone()), styles);

    chip.runtime.connect();
    group.connect();

    assert_eq!(sources.injected().len(), 1);
    assert!(group_host.containment_applied());
}

#[test]
fn incremental_update_patches_without_rerender_fallback() {
    let (registry, sources) = fresh_style_world();
    let mut h = chip_harness(&registry, &sources);
    h.runtime.connect();

    h.host.set_attribute("label", "Two");
    h.runtime.attribute_changed("label", Some("One"), Some("Two"));
    assert!(h.host.content().contains(">Two</span>"));

    // Variant has no incremental path; the fallback full render must pick up
    // the new attribute state and keep listeners flat.
    h.host.set_attribute("variant", "accent");
    h.runtime.attribute_changed("variant", None, Some("accent"));
    assert!(h.host.content().contains("chip-accent"));
    assert_eq!(h.host.listener_count(), 1);
}

#[test]
fn invalid_variant_produces_exactly_one_tagged_finding() {
    diagnostics::reset();
    let (registry, sources) = fresh_style_world();
    let host = MemoryHost::new("ui-chip");
    host.set_attribute("label", "One");
    host.set_attribute("variant", "sparkly");
    let styles = StyleService::new(
        Rc::clone(&registry),
        Rc::clone(&sources) as Rc<dyn StyleSources>,
    );
    let mut runtime =
        ElementRuntime::with_styles(Box::new(Chip::default()), Rc::new(host.clone()), styles);

    runtime.connect();

    let findings: Vec<_> = diagnostics::get_all()
        .into_iter()
        .filter(|e| e.code == element_core::DiagnosticCode::InvalidAttributeValue)
        .collect();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].component, "ui-chip");
    assert!(host.content().contains("chip-neutral"));
}

#[test]
fn emit_carries_detail_verbatim() {
    let (registry, sources) = fresh_style_world();
    let host = MemoryHost::new("ui-chip");
    let styles = StyleService::new(
        Rc::clone(&registry),
        Rc::clone(&sources) as Rc<dyn StyleSources>,
    );

    struct Emitter;
    impl Component for Emitter {
        fn spec(&self) -> &'static ComponentSpec {
            &CHIP_SPEC
        }
        fn render(&mut self, ctx: &mut RenderCtx<'_>) {
            ctx.set_content("<span></span>");
            ctx.emit("chip-ready", json!({ "count": 3, "tags": ["a", "b"] }));
        }
    }

    let mut runtime = ElementRuntime::with_styles(Box::new(Emitter), Rc::new(host.clone()), styles);
    runtime.connect();

    assert_eq!(
        host.dispatched(),
        vec![("chip-ready".to_string(), json!({ "count": 3, "tags": ["a", "b"] }))]
    );
}
