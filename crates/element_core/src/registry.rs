//! Process-wide tag registry binding component types to their tags.
//!
//! Registration is idempotent per tag so independent bundles may register the
//! same catalog without coordinating. The tag list is exposed read-only for
//! agent tooling's runtime introspection.

use std::cell::RefCell;

use thiserror::Error;

use crate::component::Component;
use crate::descriptor::ComponentSpec;

/// Builds a fresh component instance for one element.
pub type ComponentFactory = fn() -> Box<dyn Component>;

/// Errors surfaced by registry operations. These face integrators wiring the
/// catalog, never components.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No component type is registered under the tag.
    #[error("no component registered for tag `{0}`")]
    UnknownTag(String),
    /// The tag does not conform to the lowercase hyphenated policy.
    #[error("invalid component tag `{0}`; expected a lowercase hyphenated name")]
    InvalidTag(String),
}

struct Registration {
    spec: &'static ComponentSpec,
    factory: ComponentFactory,
}

thread_local! {
    static REGISTRY: RefCell<Vec<Registration>> = const { RefCell::new(Vec::new()) };
}

/// Binds `spec.tag` to `factory`.
///
/// A second registration for an already-bound tag is a no-op, not an error.
///
/// # Errors
///
/// Returns [`RegistryError::InvalidTag`] when the tag violates the naming
/// policy.
pub fn register(spec: &'static ComponentSpec, factory: ComponentFactory) -> Result<(), RegistryError> {
    if !ComponentSpec::is_valid_tag(spec.tag) {
        return Err(RegistryError::InvalidTag(spec.tag.to_string()));
    }
    REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        if registry.iter().any(|r| r.spec.tag == spec.tag) {
            log::debug!("tag <{}> already registered, ignoring", spec.tag);
            return;
        }
        registry.push(Registration { spec, factory });
    });
    Ok(())
}

/// Returns whether a component type is bound to `tag`.
pub fn is_registered(tag: &str) -> bool {
    REGISTRY.with(|registry| registry.borrow().iter().any(|r| r.spec.tag == tag))
}

/// Returns every registered tag in registration order, for agent tooling.
pub fn registered_tags() -> Vec<String> {
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .iter()
            .map(|r| r.spec.tag.to_string())
            .collect()
    })
}

/// Returns the static configuration registered under `tag`.
pub fn spec_for(tag: &str) -> Option<&'static ComponentSpec> {
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .iter()
            .find(|r| r.spec.tag == tag)
            .map(|r| r.spec)
    })
}

/// Builds a fresh component instance for `tag`.
///
/// # Errors
///
/// Returns [`RegistryError::UnknownTag`] when nothing is registered under it.
pub fn instantiate(tag: &str) -> Result<Box<dyn Component>, RegistryError> {
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .iter()
            .find(|r| r.spec.tag == tag)
            .map(|r| (r.factory)())
            .ok_or_else(|| RegistryError::UnknownTag(tag.to_string()))
    })
}

/// Clears every registration. Test isolation hook.
pub fn reset() {
    REGISTRY.with(|registry| registry.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use crate::context::RenderCtx;

    use super::*;

    const SPEC_A: ComponentSpec = ComponentSpec {
        tag: "ui-alpha",
        watched_attributes: &[],
        style_id: None,
        containment: false,
    };

    const SPEC_BAD: ComponentSpec = ComponentSpec {
        tag: "Alpha",
        watched_attributes: &[],
        style_id: None,
        containment: false,
    };

    struct Alpha;

    impl Component for Alpha {
        fn spec(&self) -> &'static ComponentSpec {
            &SPEC_A
        }

        fn render(&mut self, ctx: &mut RenderCtx<'_>) {
            ctx.set_content("<p>alpha</p>");
        }
    }

    fn alpha_factory() -> Box<dyn Component> {
        Box::new(Alpha)
    }

    #[test]
    fn registration_is_idempotent_per_tag() {
        reset();
        register(&SPEC_A, alpha_factory).expect("register");
        register(&SPEC_A, alpha_factory).expect("re-register is a no-op");

        assert_eq!(registered_tags(), vec!["ui-alpha".to_string()]);
        assert!(is_registered("ui-alpha"));
        assert_eq!(spec_for("ui-alpha"), Some(&SPEC_A));
    }

    #[test]
    fn invalid_tags_are_rejected() {
        reset();
        let err = register(&SPEC_BAD, alpha_factory).expect_err("must reject");
        assert_eq!(err, RegistryError::InvalidTag("Alpha".to_string()));
        assert!(registered_tags().is_empty());
    }

    #[test]
    fn instantiate_builds_fresh_components() {
        reset();
        register(&SPEC_A, alpha_factory).expect("register");

        let component = instantiate("ui-alpha").expect("instantiate");
        assert_eq!(component.spec().tag, "ui-alpha");

        // `Box<dyn Component>` is not `Debug`, so unwrap the error by hand.
        let err = match instantiate("ui-missing") {
            Ok(_) => panic!("unknown tag must not instantiate"),
            Err(err) => err,
        };
        assert_eq!(err, RegistryError::UnknownTag("ui-missing".to_string()));
    }
}
