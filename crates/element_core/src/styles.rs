//! Deduplicated, origin-validated stylesheet loading.
//!
//! Component stylesheets are loaded at most once per process, no matter how
//! many instances of how many component types share a style id. The base path
//! is discovered from link elements a bundler may already have placed, but a
//! discovered path is trusted only after it proves same-origin with the
//! document; otherwise the hardcoded default path is used. A single bundled
//! stylesheet, when present, short-circuits all per-component loads.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::origin::{is_relative_reference, is_same_origin, Origin};

/// Fallback base path used when no trustworthy path can be discovered.
pub const DEFAULT_STYLE_BASE: &str = "/styles/";

/// Document-level facts the loader needs, supplied by the host adapter.
pub trait StyleSources {
    /// The document's own origin (`location.origin`), when known.
    fn document_origin(&self) -> Option<String>;

    /// Base path discovered from an existing component-style link element,
    /// untrusted until validated.
    fn discovered_base(&self) -> Option<String>;

    /// Whether a single bundled stylesheet covering all components is present.
    fn bundle_present(&self) -> bool;

    /// Injects a stylesheet link for `style_id` pointing at `href`.
    fn inject_link(&self, style_id: &str, href: &str);
}

/// Process-wide load-once registry keyed by style id.
pub struct StyleRegistry {
    loaded: HashSet<String>,
    bundle: Option<bool>,
    base: Option<String>,
    default_base: String,
}

impl StyleRegistry {
    /// Creates a registry using [`DEFAULT_STYLE_BASE`] as the fallback path.
    pub fn new() -> Self {
        Self::with_default_base(DEFAULT_STYLE_BASE)
    }

    /// Creates a registry with a custom fallback base path.
    pub fn with_default_base(base: impl Into<String>) -> Self {
        Self {
            loaded: HashSet::new(),
            bundle: None,
            base: None,
            default_base: base.into(),
        }
    }

    /// Returns the process-shared registry.
    pub fn shared() -> Rc<RefCell<StyleRegistry>> {
        thread_local! {
            static SHARED: Rc<RefCell<StyleRegistry>> =
                Rc::new(RefCell::new(StyleRegistry::new()));
        }
        SHARED.with(Rc::clone)
    }

    /// Returns whether `style_id` has already been requested.
    pub fn is_loaded(&self, style_id: &str) -> bool {
        self.loaded.contains(style_id)
    }

    /// Guarantees the stylesheet for `style_id` has been requested, injecting
    /// a link on the first call and doing nothing on every later one.
    ///
    /// The bundle check and the base-path resolution each run once and are
    /// cached for the life of the registry.
    pub fn ensure(&mut self, style_id: &str, sources: &dyn StyleSources) {
        let bundled = *self.bundle.get_or_insert_with(|| sources.bundle_present());
        if bundled {
            return;
        }
        // Mark before injecting so re-entrant calls see the id as taken.
        if !self.loaded.insert(style_id.to_string()) {
            return;
        }
        let base = self.resolve_base(sources);
        let href = if base.ends_with('/') {
            format!("{base}{style_id}.css")
        } else {
            format!("{base}/{style_id}.css")
        };
        log::debug!("loading stylesheet {style_id} from {href}");
        sources.inject_link(style_id, &href);
    }

    fn resolve_base(&mut self, sources: &dyn StyleSources) -> String {
        if let Some(base) = &self.base {
            return base.clone();
        }
        let resolved = match sources.discovered_base() {
            Some(href) if self.trusts(&href, sources) => href,
            Some(href) => {
                log::warn!(
                    "discovered stylesheet base {href:?} is not same-origin; \
                     falling back to {:?}",
                    self.default_base
                );
                self.default_base.clone()
            }
            None => self.default_base.clone(),
        };
        self.base = Some(resolved.clone());
        resolved
    }

    /// A discovered path is trusted when it is relative, or when it proves
    /// same-origin against a parseable document origin. An absolute path with
    /// no known document origin to check against is never trusted.
    fn trusts(&self, href: &str, sources: &dyn StyleSources) -> bool {
        if is_relative_reference(href) {
            return true;
        }
        match sources.document_origin().and_then(|o| Origin::parse(&o)) {
            Some(document) => is_same_origin(href, &document),
            None => false,
        }
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable pairing of the shared registry with a host adapter's sources,
/// handed to each element runtime.
#[derive(Clone)]
pub struct StyleService {
    registry: Rc<RefCell<StyleRegistry>>,
    sources: Rc<dyn StyleSources>,
}

impl StyleService {
    /// Builds a service over an explicit registry, for tests and embedders.
    pub fn new(registry: Rc<RefCell<StyleRegistry>>, sources: Rc<dyn StyleSources>) -> Self {
        Self { registry, sources }
    }

    /// Builds a service over the process-shared registry.
    pub fn with_shared_registry(sources: Rc<dyn StyleSources>) -> Self {
        Self::new(StyleRegistry::shared(), sources)
    }

    /// See [`StyleRegistry::ensure`].
    pub fn ensure(&self, style_id: &str) {
        self.registry.borrow_mut().ensure(style_id, self.sources.as_ref());
    }
}

/// In-memory [`StyleSources`] double recording every injected link.
#[derive(Default)]
pub struct MemoryStyleSources {
    /// Reported document origin.
    pub origin: Option<String>,
    /// Reported discovered base path.
    pub discovered: Option<String>,
    /// Reported bundle presence.
    pub bundled: bool,
    injected: RefCell<Vec<(String, String)>>,
}

impl MemoryStyleSources {
    /// Creates a double with a typical same-origin document.
    pub fn new() -> Self {
        Self {
            origin: Some("https://app.example.com".to_string()),
            ..Self::default()
        }
    }

    /// Returns every `(style_id, href)` pair injected so far.
    pub fn injected(&self) -> Vec<(String, String)> {
        self.injected.borrow().clone()
    }
}

impl StyleSources for MemoryStyleSources {
    fn document_origin(&self) -> Option<String> {
        self.origin.clone()
    }

    fn discovered_base(&self) -> Option<String> {
        self.discovered.clone()
    }

    fn bundle_present(&self) -> bool {
        self.bundled
    }

    fn inject_link(&self, style_id: &str, href: &str) {
        self.injected
            .borrow_mut()
            .push((style_id.to_string(), href.to_string()));
    }
}
