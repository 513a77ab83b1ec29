//! Document-level stylesheet discovery and injection.
//!
//! Implements the core's [`StyleSources`] against a real document: the base
//! path is discovered from a component-style link a bundler may already have
//! placed (`link[rel=stylesheet][data-ui-style]`), the bundle short-circuit
//! checks for `link[data-ui-bundle]`, and per-component links are appended to
//! `<head>`. Origin validation of the discovered path happens in the core;
//! this module only reports what the document contains.

use element_core::StyleSources;

/// Attribute marking a per-component stylesheet link.
pub const STYLE_LINK_ATTR: &str = "data-ui-style";

/// Attribute marking the all-components bundled stylesheet.
pub const BUNDLE_LINK_ATTR: &str = "data-ui-bundle";

/// Strips the final path segment of a link href, keeping the trailing slash,
/// so `/assets/css/badge.css` yields `/assets/css/`.
pub(crate) fn base_of_href(href: &str) -> Option<String> {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    let path = &href[..end];
    let slash = path.rfind('/')?;
    Some(path[..=slash].to_string())
}

/// [`StyleSources`] over one document.
pub struct DocumentStyleSources {
    document: web_sys::Document,
}

impl DocumentStyleSources {
    /// Builds sources over a document.
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// Builds sources over the document owning `element`, when it has one.
    pub fn for_element(element: &web_sys::Element) -> Option<Self> {
        element.owner_document().map(Self::new)
    }
}

impl StyleSources for DocumentStyleSources {
    fn document_origin(&self) -> Option<String> {
        self.document.location().and_then(|loc| loc.origin().ok())
    }

    fn discovered_base(&self) -> Option<String> {
        let selector = format!("link[rel=stylesheet][{STYLE_LINK_ATTR}]");
        let link = self.document.query_selector(&selector).ok().flatten()?;
        base_of_href(&link.get_attribute("href")?)
    }

    fn bundle_present(&self) -> bool {
        let selector = format!("link[{BUNDLE_LINK_ATTR}]");
        matches!(self.document.query_selector(&selector), Ok(Some(_)))
    }

    fn inject_link(&self, style_id: &str, href: &str) {
        let Ok(link) = self.document.create_element("link") else {
            log::warn!("failed to create stylesheet link for {style_id:?}");
            return;
        };
        let ok = link.set_attribute("rel", "stylesheet").is_ok()
            && link.set_attribute("href", href).is_ok()
            && link.set_attribute(STYLE_LINK_ATTR, style_id).is_ok();
        if !ok {
            log::warn!("failed to prepare stylesheet link for {style_id:?}");
            return;
        }
        if let Some(head) = self.document.head() {
            let _ = head.append_child(&link);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_of_href_keeps_directory_with_trailing_slash() {
        assert_eq!(base_of_href("/assets/css/badge.css").as_deref(), Some("/assets/css/"));
        assert_eq!(base_of_href("/badge.css").as_deref(), Some("/"));
        assert_eq!(
            base_of_href("https://app.example.com/css/badge.css").as_deref(),
            Some("https://app.example.com/css/")
        );
    }

    #[test]
    fn base_of_href_ignores_query_and_fragment() {
        assert_eq!(
            base_of_href("/assets/css/badge.css?v=3#x").as_deref(),
            Some("/assets/css/")
        );
    }

    #[test]
    fn base_of_href_requires_a_path_separator() {
        assert_eq!(base_of_href("badge.css"), None);
    }
}
